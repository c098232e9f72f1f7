//! Batch planning — turn a templates-folder listing into conversion configs.
//!
//! # Naming rule
//!
//! The output file name is the model's base name plus an extension taken
//! from the template file name's first dot-segment; the second dot-segment
//! sets the output encoding when it names a known charset:
//!
//! | template file              | output (model `library.xml`) | encoding   |
//! |----------------------------|------------------------------|------------|
//! | `java.UTF-8.tera`          | `library.java`               | UTF-8      |
//! | `properties.ISO-8859-1.tera` | `library.properties`       | ISO-8859-1 |
//! | `summary.tera`             | `library.summary`            | default    |
//!
//! Computed names that collide get `(1)`, `(2)`, … appended in encounter
//! order. Encounter order is the sorted file-name order, so plans are
//! deterministic across platforms.

use std::collections::HashMap;
use std::path::Path;

use anyhow::{bail, Context, Result};

use modelgen_convert::ConversionConfig;
use modelgen_core::OutputEncoding;

/// One config per regular file directly inside `templates_dir`.
///
/// Subdirectories are not descended into; dotfiles (whose first dot-segment
/// is empty) are skipped.
pub fn synthesize_configs(
    model_path: &str,
    templates_dir: &Path,
    output_dir: &Path,
) -> Result<Vec<ConversionConfig>> {
    let base = model_base_name(model_path)?;

    let entries = std::fs::read_dir(templates_dir)
        .with_context(|| format!("cannot list templates folder '{}'", templates_dir.display()))?;
    let mut template_names: Vec<String> = entries
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().map(|t| t.is_file()).unwrap_or(false))
        .map(|e| e.file_name().to_string_lossy().into_owned())
        .filter(|name| !name.starts_with('.'))
        .collect();
    template_names.sort();

    let mut used_names: HashMap<String, usize> = HashMap::new();
    let configs = template_names
        .iter()
        .map(|template_name| {
            let output_name = disambiguate(
                &format!("{base}.{}", first_dot_segment(template_name)),
                &mut used_names,
            );
            ConversionConfig::new(
                model_path,
                templates_dir.join(template_name).to_string_lossy(),
                output_dir.join(output_name).to_string_lossy(),
                encoding_segment(template_name),
            )
        })
        .collect();
    Ok(configs)
}

/// Config for a single-template conversion.
///
/// `out` overrides the computed output name; `encoding` overrides the
/// dot-segment rule.
pub fn single_config(
    model_path: &str,
    template_path: &str,
    output_dir: &Path,
    out: Option<&str>,
    encoding: Option<OutputEncoding>,
) -> Result<ConversionConfig> {
    let output_file_path = match out {
        Some(out) => out.to_owned(),
        None => {
            let base = model_base_name(model_path)?;
            let template_name = Path::new(template_path)
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            output_dir
                .join(format!("{base}.{}", first_dot_segment(&template_name)))
                .to_string_lossy()
                .into_owned()
        }
    };
    Ok(ConversionConfig::new(
        model_path,
        template_path,
        output_file_path,
        encoding.or_else(|| {
            Path::new(template_path)
                .file_name()
                .and_then(|n| n.to_str())
                .and_then(encoding_segment)
        }),
    ))
}

fn model_base_name(model_path: &str) -> Result<String> {
    match Path::new(model_path).file_stem() {
        Some(stem) if !stem.is_empty() => Ok(stem.to_string_lossy().into_owned()),
        _ => bail!("model path '{model_path}' has no file name"),
    }
}

fn first_dot_segment(name: &str) -> &str {
    name.split('.').next().unwrap_or(name)
}

/// Second dot-segment as an encoding, when it names a known charset and is
/// not the final (extension) segment.
fn encoding_segment(name: &str) -> Option<OutputEncoding> {
    let segments: Vec<&str> = name.split('.').collect();
    if segments.len() < 3 {
        return None;
    }
    segments[1].parse().ok()
}

fn disambiguate(name: &str, used: &mut HashMap<String, usize>) -> String {
    let n = used.entry(name.to_owned()).or_insert(0);
    let result = if *n == 0 {
        name.to_owned()
    } else {
        format!("{name}({n})")
    };
    *n += 1;
    result
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

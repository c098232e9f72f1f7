//! modelgen — generate text artifacts from an XML model description.
//!
//! # Usage
//!
//! ```text
//! modelgen <MODEL> [-t <DIR>] [-o <DIR>]
//! modelgen <MODEL> --template <FILE> [--out <FILE>] [--encoding <ENC>]
//! ```
//!
//! Without `--template`, every file directly in the templates folder is
//! rendered against the model, producing one output file per template.

mod plan;

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;

use modelgen_convert::{ConversionError, ModelConverter};
use modelgen_core::OutputEncoding;

// ---------------------------------------------------------------------------
// CLI entry point
// ---------------------------------------------------------------------------

#[derive(Parser, Debug)]
#[command(
    name = "modelgen",
    version,
    about = "Generate files from an XML model description and a set of templates",
    long_about = None,
)]
struct Cli {
    /// Path to the XML model description.
    model: String,

    /// Template source folder (default: a `templates` folder next to the
    /// model description).
    #[arg(long, short = 't', value_name = "DIR")]
    templates: Option<PathBuf>,

    /// Output folder for generated files.
    #[arg(long, short = 'o', value_name = "DIR", default_value = ".")]
    output: PathBuf,

    /// Convert a single template file instead of the whole templates folder.
    #[arg(long, value_name = "FILE", conflicts_with = "templates")]
    template: Option<String>,

    /// Output file for --template (default: derived from the template name).
    #[arg(long, value_name = "FILE", requires = "template")]
    out: Option<String>,

    /// Output encoding for --template: UTF-8 or ISO-8859-1.
    #[arg(long, value_name = "ENCODING", requires = "template")]
    encoding: Option<OutputEncoding>,
}

impl Cli {
    fn run(self) -> Result<Vec<PathBuf>> {
        std::fs::create_dir_all(&self.output).with_context(|| {
            format!("cannot create output folder '{}'", self.output.display())
        })?;
        let converter = ModelConverter::new();

        if let Some(template) = &self.template {
            let config = plan::single_config(
                &self.model,
                template,
                &self.output,
                self.out.as_deref(),
                self.encoding,
            )?;
            let path = converter.convert(&config)?;
            return Ok(vec![path]);
        }

        let templates_dir = self
            .templates
            .clone()
            .unwrap_or_else(|| default_templates_dir(&self.model));
        let configs = plan::synthesize_configs(&self.model, &templates_dir, &self.output)?;
        if configs.is_empty() {
            println!("No templates found in '{}'.", templates_dir.display());
            return Ok(vec![]);
        }
        Ok(converter.convert_batch(&configs)?)
    }
}

/// Default templates folder: `templates` co-located with the model file.
fn default_templates_dir(model_path: &str) -> PathBuf {
    match Path::new(model_path).parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir.join("templates"),
        _ => PathBuf::from("templates"),
    }
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    match cli.run() {
        Ok(outputs) => {
            println!("✓ generated {} file(s)", outputs.len());
            for path in &outputs {
                println!("  ✎  {}", path.display());
            }
            ExitCode::SUCCESS
        }
        // Conversion failures were logged when they were built; repeating
        // them here would double-report.
        Err(err) if err.downcast_ref::<ConversionError>().is_some() => ExitCode::FAILURE,
        Err(err) => {
            eprintln!("unexpected error: {err:?}");
            ExitCode::from(2)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_templates_dir_sits_next_to_the_model() {
        assert_eq!(
            default_templates_dir("models/library.xml"),
            PathBuf::from("models/templates")
        );
        assert_eq!(default_templates_dir("library.xml"), PathBuf::from("templates"));
    }

    #[test]
    fn cli_parses_batch_invocation() {
        let cli = Cli::parse_from(["modelgen", "library.xml", "-t", "tpl", "-o", "out"]);
        assert_eq!(cli.model, "library.xml");
        assert_eq!(cli.templates, Some(PathBuf::from("tpl")));
        assert_eq!(cli.output, PathBuf::from("out"));
        assert!(cli.template.is_none());
    }

    #[test]
    fn cli_parses_single_template_invocation() {
        let cli = Cli::parse_from([
            "modelgen",
            "library.xml",
            "--template",
            "tpl/java.UTF-8.tera",
            "--encoding",
            "ISO-8859-1",
        ]);
        assert_eq!(cli.template.as_deref(), Some("tpl/java.UTF-8.tera"));
        assert_eq!(cli.encoding, Some(OutputEncoding::Latin1));
    }
}

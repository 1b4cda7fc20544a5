//! cssprettier - Reformats minified CSS into readable, indented form

#![warn(clippy::all)]
#![warn(clippy::pedantic)]

use std::io::{self, BufReader, Cursor, IsTerminal, Read, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

use cssprettier::process::{format_document, format_path};
use cssprettier::{find_directive, parse_args, CliArgs, Config, Result};
use glob::Pattern;
use rayon::prelude::*;
use walkdir::WalkDir;

/// CSS file extensions to process
const CSS_EXTENSIONS: &[&str] = &["css", "CSS"];

/// Default maximum file size in bytes (100 MB)
/// Files larger than this are skipped to prevent memory exhaustion
const DEFAULT_MAX_FILE_SIZE: u64 = 100 * 1024 * 1024;

/// Per-file result used for the summary and exit code
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FileStatus {
    /// File was rewritten (or printed) successfully
    Formatted,
    /// `--check`: file is already formatted
    Clean,
    /// `--check`: file would change
    WouldReformat,
    /// File was skipped (size guard)
    Skipped,
}

fn main() -> Result<()> {
    // Parse CLI arguments
    let args = parse_args();

    // Check if we should read from stdin
    let use_stdin =
        args.inputs.is_empty() || (args.inputs.len() == 1 && args.inputs[0].as_os_str() == "-");

    // If no inputs and running interactively, print usage; otherwise read from stdin
    if args.inputs.is_empty() && io::stdin().is_terminal() {
        print_usage();
        return Ok(());
    }

    if use_stdin {
        let config = build_config(&args, None)?;
        return process_stdin(&config, &args);
    }

    // Build base configuration for all files. For explicit config files we
    // use one config; for auto-discovery each file may have its own.
    let use_per_file_config = args.config.is_none();
    let base_config = if use_per_file_config {
        None
    } else {
        Some(build_config(&args, None)?)
    };

    // Configure thread pool if --jobs specified
    if let Some(jobs) = args.jobs {
        if jobs > 0 {
            if let Err(e) = rayon::ThreadPoolBuilder::new()
                .num_threads(jobs)
                .build_global()
            {
                eprintln!("Warning: failed to configure thread pool: {e}");
            }
        }
    }

    // Collect all files to process; explicitly named inputs that do not
    // exist are reported and fail the run without any writes
    let (files, missing) = collect_files(&args);

    if files.is_empty() && missing == 0 {
        if !args.silent {
            eprintln!("No CSS files found to format.");
        }
        return Ok(());
    }

    // Process files
    let use_sequential = args.stdout || args.jobs == Some(1);
    let counts = if use_sequential {
        process_files_sequential(&files, base_config.as_ref(), &args)
    } else {
        process_files_parallel(&files, base_config.as_ref(), &args)
    };

    if !args.silent && !args.stdout {
        if args.check {
            eprintln!(
                "Checked {} files, {} would be reformatted.",
                counts.success + counts.needs_format,
                counts.needs_format
            );
        } else if counts.errors == 0 {
            eprintln!("Formatted {} files successfully.", counts.success);
        } else {
            eprintln!("Formatted {} files, {} errors.", counts.success, counts.errors);
        }
    }

    if missing > 0 || counts.errors > 0 || (args.check && counts.needs_format > 0) {
        std::process::exit(1);
    }

    Ok(())
}

/// Aggregated per-run counters
#[derive(Debug, Default)]
struct RunCounts {
    success: usize,
    errors: usize,
    needs_format: usize,
}

/// Build configuration from CLI args and optional config file
///
/// If `for_path` is provided and no explicit config file is specified,
/// uses auto-discovery to find config files in parent directories.
fn build_config(args: &CliArgs, for_path: Option<&Path>) -> Result<Config> {
    let mut config = if let Some(config_path) = &args.config {
        // Explicit config file specified
        if args.debug {
            eprintln!(
                "[DEBUG] Using explicit config file: {}",
                config_path.display()
            );
        }
        Config::from_toml_file(config_path)?
    } else if let Some(path) = for_path {
        // Auto-discover config files from parent directories
        if args.debug {
            let discovered = Config::discover_config_files(path);
            if discovered.is_empty() {
                eprintln!("[DEBUG] No config files discovered for: {}", path.display());
            } else {
                eprintln!("[DEBUG] Discovered config files for {}:", path.display());
                for f in &discovered {
                    eprintln!("[DEBUG]   - {}", f.display());
                }
            }
        }
        Config::from_discovered_files(path)
    } else {
        Config::from_discovered_files(&std::env::current_dir().unwrap_or_default())
    };

    // Override with CLI arguments
    if let Some(indent) = args.indent {
        config.indent = indent;
    }
    if args.no_backup {
        config.backup = false;
    }
    if let Some(suffix) = &args.backup_suffix {
        config.backup_suffix = suffix.clone();
    }
    if args.no_embedded {
        config.format_embedded = false;
    }

    // Print final config in debug mode
    if args.debug {
        print_config_debug(&config);
    }

    // Validate configuration
    if let Some(error) = config.validate() {
        anyhow::bail!("Invalid configuration: {error}");
    }

    Ok(config)
}

/// Print configuration values in debug mode
fn print_config_debug(config: &Config) {
    eprintln!("[DEBUG] Configuration:");
    eprintln!("[DEBUG]   indent: {}", config.indent);
    eprintln!("[DEBUG]   backup: {}", config.backup);
    eprintln!("[DEBUG]   backup_suffix: {}", config.backup_suffix);
    eprintln!("[DEBUG]   format_embedded: {}", config.format_embedded);
}

/// Collect all files to process, handling directories and recursive flag
///
/// Returns the files plus the count of explicitly named inputs that do
/// not exist (each is reported to stderr as it is found).
fn collect_files(args: &CliArgs) -> (Vec<PathBuf>, usize) {
    // Compile exclude patterns
    let exclude_patterns: Vec<Pattern> = args
        .exclude
        .iter()
        .filter_map(|p| Pattern::new(p).ok())
        .collect();

    // Get custom CSS extensions
    let custom_extensions = &args.css_extensions;

    let mut files = Vec::new();
    let mut missing = 0;

    for input in &args.inputs {
        if input.is_file() {
            if !is_excluded(input, &exclude_patterns) {
                files.push(input.clone());
            }
        } else if input.is_dir() {
            if args.recursive {
                // Recursive directory traversal. WalkDir detects symlink
                // loops when follow_links(true); errors are skipped.
                for entry in WalkDir::new(input)
                    .follow_links(true)
                    .max_depth(256)
                    .into_iter()
                    .filter_map(std::result::Result::ok)
                {
                    let path = entry.path();
                    if path.is_file()
                        && is_css_file(path, custom_extensions)
                        && !is_excluded(path, &exclude_patterns)
                    {
                        files.push(path.to_path_buf());
                    }
                }
            } else {
                // Non-recursive: only direct children
                if let Ok(entries) = std::fs::read_dir(input) {
                    for entry in entries.filter_map(std::result::Result::ok) {
                        let path = entry.path();
                        if path.is_file()
                            && is_css_file(&path, custom_extensions)
                            && !is_excluded(&path, &exclude_patterns)
                        {
                            files.push(path);
                        }
                    }
                }
            }
        } else {
            eprintln!("Error: CSS file not found at {}", input.display());
            missing += 1;
        }
    }

    (files, missing)
}

/// Check if a path matches any exclusion pattern
fn is_excluded(path: &Path, patterns: &[Pattern]) -> bool {
    if patterns.is_empty() {
        return false;
    }

    let path_str = path.to_string_lossy();

    for pattern in patterns {
        // Match against full path
        if pattern.matches(&path_str) {
            return true;
        }

        // Match against file name only
        if let Some(file_name) = path.file_name() {
            if pattern.matches(&file_name.to_string_lossy()) {
                return true;
            }
        }

        // Match against each path component (for directory patterns)
        for component in path.components() {
            if let std::path::Component::Normal(c) = component {
                if pattern.matches(&c.to_string_lossy()) {
                    return true;
                }
            }
        }
    }

    false
}

/// Check if a file has a CSS extension
/// Checks against both default extensions and any custom extensions provided
fn is_css_file(path: &Path, custom_extensions: &[String]) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            // Check default extensions
            if CSS_EXTENSIONS.contains(&ext) {
                return true;
            }
            // Check custom extensions (with or without leading dot)
            for custom in custom_extensions {
                let custom_ext = custom.strip_prefix('.').unwrap_or(custom);
                if ext == custom_ext {
                    return true;
                }
            }
            false
        })
}

/// Process files sequentially (for stdout output)
fn process_files_sequential(
    files: &[PathBuf],
    base_config: Option<&Config>,
    args: &CliArgs,
) -> RunCounts {
    let mut counts = RunCounts::default();

    for path in files {
        // Use base config if provided, otherwise discover per-file config
        let file_result = if let Some(config) = base_config {
            process_single_file(path, config, args)
        } else {
            match build_config(args, Some(path)) {
                Ok(config) => process_single_file(path, &config, args),
                Err(e) => Err(e),
            }
        };

        match file_result {
            Ok(FileStatus::WouldReformat) => counts.needs_format += 1,
            Ok(_) => counts.success += 1,
            Err(e) => {
                counts.errors += 1;
                eprintln!("Error formatting {}: {}", path.display(), e);
            }
        }
    }

    counts
}

/// Process files in parallel using Rayon
fn process_files_parallel(
    files: &[PathBuf],
    base_config: Option<&Config>,
    args: &CliArgs,
) -> RunCounts {
    let success_count = AtomicUsize::new(0);
    let error_count = AtomicUsize::new(0);
    let needs_format_count = AtomicUsize::new(0);

    files.par_iter().for_each(|path| {
        // Use base config if provided, otherwise discover per-file config
        let file_result = if let Some(config) = base_config {
            process_single_file(path, config, args)
        } else {
            match build_config(args, Some(path)) {
                Ok(config) => process_single_file(path, &config, args),
                Err(e) => Err(e),
            }
        };

        match file_result {
            Ok(FileStatus::WouldReformat) => {
                needs_format_count.fetch_add(1, Ordering::Relaxed);
            }
            Ok(_) => {
                success_count.fetch_add(1, Ordering::Relaxed);
            }
            Err(e) => {
                error_count.fetch_add(1, Ordering::Relaxed);
                eprintln!("Error formatting {}: {}", path.display(), e);
            }
        }
    });

    RunCounts {
        success: success_count.load(Ordering::Relaxed),
        errors: error_count.load(Ordering::Relaxed),
        needs_format: needs_format_count.load(Ordering::Relaxed),
    }
}

/// Apply directive overrides from file contents to a configuration
fn apply_directive_overrides(config: &mut Config, contents: &str, debug: bool, source_name: &str) {
    let cursor = Cursor::new(contents);
    if let Some(overrides) = find_directive(&mut BufReader::new(cursor)) {
        if debug {
            eprintln!("[DEBUG] Found file directive in {source_name}");
        }
        if let Some(indent) = overrides.indent {
            if debug {
                eprintln!("[DEBUG]   Directive override: indent = {indent}");
            }
            config.indent = indent;
        }
        if let Some(backup) = overrides.backup {
            if debug {
                eprintln!("[DEBUG]   Directive override: backup = {backup}");
            }
            config.backup = backup;
        }
        if let Some(format_embedded) = overrides.format_embedded {
            if debug {
                eprintln!("[DEBUG]   Directive override: format_embedded = {format_embedded}");
            }
            config.format_embedded = format_embedded;
        }
    }
}

/// Process a single file
fn process_single_file(path: &Path, config: &Config, args: &CliArgs) -> Result<FileStatus> {
    // Check file size BEFORE reading to prevent memory exhaustion
    let metadata = std::fs::metadata(path)?;
    let file_size = metadata.len();
    if file_size > DEFAULT_MAX_FILE_SIZE {
        if !args.silent {
            let size_mb = file_size / (1024 * 1024);
            let limit_mb = DEFAULT_MAX_FILE_SIZE / (1024 * 1024);
            eprintln!(
                "Skipping {} ({size_mb} MB exceeds limit of {limit_mb} MB)",
                path.display()
            );
        }
        return Ok(FileStatus::Skipped);
    }

    // Read input file into memory
    let contents = std::fs::read_to_string(path)?;

    // Make a per-file copy of config that can be overridden by directives
    let mut file_config = config.clone();
    apply_directive_overrides(
        &mut file_config,
        &contents,
        args.debug,
        path.to_str().unwrap_or("unknown"),
    );

    if args.stdout {
        let formatted = format_document(&contents, &file_config);
        io::stdout().write_all(formatted.as_bytes())?;
        return Ok(FileStatus::Formatted);
    }

    if args.check {
        let formatted = format_document(&contents, &file_config);
        if formatted == contents {
            return Ok(FileStatus::Clean);
        }
        if !args.silent {
            println!("Would reformat: {}", path.display());
        }
        return Ok(FileStatus::WouldReformat);
    }

    // Rewrite in place, backup first
    if !args.silent {
        eprintln!("Formatting: {} ({} bytes)", path.display(), contents.len());
    }

    let outcome = format_path(path, &file_config, file_config.backup)?;

    if !args.silent {
        if let Some(backup) = &outcome.backup_path {
            eprintln!("  backup written to {}", backup.display());
        }
        if outcome.changed {
            eprintln!(
                "  formatted {} -> {} bytes",
                outcome.original_len, outcome.formatted_len
            );
        } else {
            eprintln!("  already formatted, no changes");
        }
    }

    Ok(FileStatus::Formatted)
}

/// Process input from stdin, output to stdout
fn process_stdin(config: &Config, args: &CliArgs) -> Result<()> {
    // Read all input from stdin
    let mut stdin_contents = String::new();
    io::stdin().read_to_string(&mut stdin_contents)?;

    // Check size after reading to prevent processing extremely large input
    let stdin_size = stdin_contents.len() as u64;
    if stdin_size > DEFAULT_MAX_FILE_SIZE {
        anyhow::bail!(
            "stdin input too large ({} MB exceeds limit of {} MB)",
            stdin_size / (1024 * 1024),
            DEFAULT_MAX_FILE_SIZE / (1024 * 1024)
        );
    }

    // Make a copy of config that can be overridden by directives
    let mut file_config = config.clone();
    apply_directive_overrides(&mut file_config, &stdin_contents, args.debug, "stdin");

    // Format the input and write to stdout
    let formatted = format_document(&stdin_contents, &file_config);
    io::stdout().write_all(formatted.as_bytes())?;

    if !args.silent {
        eprintln!("Formatted stdin successfully.");
    }

    Ok(())
}

fn print_usage() {
    println!(
        "cssprettier v{} - CSS unminifier/reformatter",
        env!("CARGO_PKG_VERSION")
    );
    println!();
    println!("Reformats minified CSS into readable, indented form.");
    println!();
    println!("Usage:");
    println!("  cssprettier [OPTIONS] <FILE>...");
    println!("  cssprettier [OPTIONS] -r <DIRECTORY>");
    println!("  cssprettier [OPTIONS] -              # Read from stdin");
    println!("  cat style.min.css | cssprettier      # Pipe input");
    println!();
    println!("Examples:");
    println!("  cssprettier style.css              # Format in-place (writes style.css.backup)");
    println!("  cssprettier *.css                  # Format multiple files");
    println!("  cssprettier -r css/                # Recursively format directory");
    println!("  cssprettier --stdout style.css     # Output to stdout, no writes");
    println!("  cssprettier -i 2 style.css         # Use 2-space indent");
    println!("  cssprettier --check -r css/        # Exit 1 if anything would change");
    println!();
    println!("Options:");
    println!("  -i, --indent <NUM>            Indent size [default: 4]");
    println!("      --no-backup               Don't write a backup copy");
    println!("      --backup-suffix <SUFFIX>  Backup suffix [default: .backup]");
    println!("      --no-embedded             Skip the embedded minified-block pass");
    println!("  -s, --stdout                  Output to stdout");
    println!("      --check                   Report files that would change; exit 1 if any");
    println!("  -r, --recursive               Process directories recursively");
    println!("  -e, --exclude <PATTERN>       Exclude files/dirs matching pattern (repeatable)");
    println!("      --css <EXT>               Additional CSS extension (repeatable)");
    println!("  -j, --jobs <NUM>              Parallel jobs (0=auto, 1=sequential)");
    println!("  -c, --config <FILE>           Config file path (overrides auto-discovery)");
    println!("  -S, --silent                  Silent mode");
    println!("  -D, --debug                   Enable debug output");
    println!("  -h, --help                    Print help");
    println!();
    println!("Config file auto-discovery:");
    println!("  Searches for cssprettier.toml in parent directories");
    println!("  starting from the file being formatted up to the root directory.");
    println!("  Also checks cssprettier.toml in the home directory.");
    println!("  More specific configs (closer to file) override less specific ones.");
    println!();
    println!("In-file directives:");
    println!("  /* cssprettier: --indent 2 --no-backup */");
}

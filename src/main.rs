use std::{
    collections::HashMap,
    env,
    fs::read_to_string,
    io::{self, BufRead, Write},
    path::PathBuf,
    process::ExitCode,
    sync::Arc,
};

use moonwalk::{
    compilation::Compilation,
    diagnostics::Diagnostic,
    evaluator::{EvaluationOptions, StdHost},
    get_line_at_position,
    parser::SyntaxTree,
    symbols::{symbols::VariableSymbol, value::Value},
};
use tracing_subscriber::EnvFilter;

const USAGE: &str = "Usage: moonwalk [FILE] [--seed N] [--show-tree] [--show-program] [--cfg FUNCTION]";

#[derive(Debug, Default)]
struct Options {
    file: Option<PathBuf>,
    seed: Option<u64>,
    show_tree: bool,
    show_program: bool,
    cfg: Option<String>,
}

fn parse_args(mut args: impl Iterator<Item = String>) -> Result<Options, String> {
    let mut options = Options::default();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--seed" => {
                let seed = args.next().ok_or("--seed requires a value")?;
                let seed = seed.parse().map_err(|_| format!("invalid seed '{seed}'"))?;
                options.seed = Some(seed);
            }
            "--show-tree" => options.show_tree = true,
            "--show-program" => options.show_program = true,
            "--cfg" => options.cfg = Some(args.next().ok_or("--cfg requires a function name")?),
            flag if flag.starts_with("--") => return Err(format!("unknown option '{flag}'")),
            file if options.file.is_none() => options.file = Some(PathBuf::from(file)),
            extra => return Err(format!("unexpected argument '{extra}'")),
        }
    }

    Ok(options)
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .init();

    let options = match parse_args(env::args().skip(1)) {
        Ok(options) => options,
        Err(message) => {
            eprintln!("Error: {message}");
            eprintln!("{USAGE}");
            return ExitCode::FAILURE;
        }
    };

    match &options.file {
        Some(file) => run_file(file, &options),
        None => run_repl(&options),
    }
}

fn run_file(path: &PathBuf, options: &Options) -> ExitCode {
    let text = match read_to_string(path) {
        Ok(text) => text,
        Err(error) => {
            eprintln!("Error: could not read {}: {error}", path.display());
            return ExitCode::FAILURE;
        }
    };

    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string());

    let tree = SyntaxTree::parse(&text, Some(file_name));
    if options.show_tree {
        println!("{:#?}", tree.root);
    }

    let compilation = Compilation::new(vec![tree]);
    show_program(&compilation, options);

    let mut globals = HashMap::new();
    let evaluation_options = EvaluationOptions { seed: options.seed };

    match compilation.evaluate_with(&mut globals, &mut StdHost, evaluation_options) {
        Ok(result) if !result.diagnostics.is_empty() => {
            display_diagnostics(&compilation, &result.diagnostics);
            ExitCode::FAILURE
        }
        Ok(result) => {
            if let Some(value) = result.value {
                println!("{value}");
            }
            ExitCode::SUCCESS
        }
        Err(error) => {
            eprintln!("Runtime error: {error}");
            ExitCode::FAILURE
        }
    }
}

fn show_program(compilation: &Compilation, options: &Options) {
    if options.show_program {
        let mut out = String::new();
        if compilation.emit_tree(&mut out).is_ok() {
            print!("{out}");
        }
    }

    if let Some(function) = &options.cfg {
        let mut out = String::new();
        match compilation.emit_control_flow_graph(function, &mut out) {
            Ok(true) => print!("{out}"),
            Ok(false) => eprintln!("Function '{function}' doesn't exist."),
            Err(_) => eprintln!("Error: could not render the graph of '{function}'"),
        }
    }
}

struct Repl {
    previous: Option<Arc<Compilation>>,
    globals: HashMap<VariableSymbol, Value>,
    show_tree: bool,
    show_program: bool,
    options: EvaluationOptions,
}

impl Repl {
    /// Handles a `#` command. Returns `false` when the REPL should stop.
    fn run_command(&mut self, command: &str) -> bool {
        match command {
            "#showTree" => {
                self.show_tree = !self.show_tree;
                println!("{}", if self.show_tree { "Showing parse trees." } else { "Not showing parse trees." });
            }
            "#showProgram" => {
                self.show_program = !self.show_program;
                println!("{}", if self.show_program { "Showing bound tree." } else { "Not showing bound tree." });
            }
            "#cls" => {
                print!("\x1B[2J\x1B[1;1H");
                let _ = io::stdout().flush();
            }
            "#reset" => {
                self.previous = None;
                self.globals.clear();
            }
            "#exit" => return false,
            other => eprintln!("Invalid command {other}."),
        }
        true
    }

    fn evaluate(&mut self, text: &str) {
        let tree = SyntaxTree::parse(text, None);
        if self.show_tree {
            println!("{:#?}", tree.root);
        }

        let compilation = match &self.previous {
            Some(previous) => previous.continue_with(tree),
            None => Compilation::new(vec![tree]),
        };

        if self.show_program {
            let mut out = String::new();
            if compilation.emit_tree(&mut out).is_ok() {
                print!("{out}");
            }
        }

        match compilation.evaluate_with(&mut self.globals, &mut StdHost, self.options) {
            Ok(result) if !result.diagnostics.is_empty() => {
                display_diagnostics(&compilation, &result.diagnostics);
            }
            Ok(result) => {
                if let Some(value) = result.value {
                    println!("{value}");
                }
                self.previous = Some(Arc::new(compilation));
            }
            Err(error) => eprintln!("Runtime error: {error}"),
        }
    }
}

/// A submission is complete once it parses, or when the syntax error sits before the end
/// of the text. A blank line always ends the submission.
fn is_complete_submission(text: &str) -> bool {
    if text.is_empty() || text.ends_with("\n\n") {
        return true;
    }

    let tree = SyntaxTree::parse(text, None);
    let content_end = text.trim_end().len() as u32;

    tree.diagnostics
        .iter()
        .all(|diagnostic| diagnostic.span.start.0 < content_end)
}

fn run_repl(options: &Options) -> ExitCode {
    let mut repl = Repl {
        previous: None,
        globals: HashMap::new(),
        show_tree: options.show_tree,
        show_program: options.show_program,
        options: EvaluationOptions { seed: options.seed },
    };

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    let mut text = String::new();

    loop {
        print!("{}", if text.is_empty() { "» " } else { "· " });
        if io::stdout().flush().is_err() {
            return ExitCode::FAILURE;
        }

        let line = match lines.next() {
            Some(Ok(line)) => line,
            Some(Err(error)) => {
                eprintln!("Error: {error}");
                return ExitCode::FAILURE;
            }
            None => return ExitCode::SUCCESS,
        };

        if text.is_empty() {
            if line.trim().is_empty() {
                continue;
            }
            if line.starts_with('#') {
                if !repl.run_command(line.trim()) {
                    return ExitCode::SUCCESS;
                }
                continue;
            }
        }

        text.push_str(&line);
        text.push('\n');

        if is_complete_submission(&text) {
            repl.evaluate(&text);
            text.clear();
        }
    }
}

fn display_diagnostics(compilation: &Compilation, diagnostics: &[Diagnostic]) {
    let mut diagnostics: Vec<&Diagnostic> = diagnostics.iter().collect();
    diagnostics.sort_by_key(|diagnostic| diagnostic.span.start.0);

    for diagnostic in diagnostics {
        match compilation.syntax_tree_at(&diagnostic.span) {
            Some(tree) => display_diagnostic(tree, diagnostic),
            None => eprintln!("error: {}", diagnostic.message),
        }
    }
}

fn display_diagnostic(tree: &SyntaxTree, diagnostic: &Diagnostic) {
    /*
        error: message
        -> main.mw:20:9
           |
        20 | let a = b
           |         ^
    */

    let file = diagnostic.span.start.1.as_str();
    let Some((line, line_text, line_pos)) = get_line_at_position(&tree.text, diagnostic.span.start.0) else {
        eprintln!("error: {}", diagnostic.message);
        eprintln!("-> {file}");
        return;
    };

    let line_str = line.to_string();
    let padding = line_str.len() + 2;

    eprintln!();
    eprintln!("error: {}", diagnostic.message);
    eprintln!("-> {}:{}:{}", file, line, line_pos + 1);
    eprintln!("{:>padding$}", "|");

    let (trimmed, removed_whitespace) = remove_starting_whitespace(&line_text);
    eprintln!("{} | {}", line_str, trimmed.trim_end());

    let column = line_pos.saturating_sub(removed_whitespace);
    let available = trimmed.len().saturating_sub(column).max(1);
    let underline = (diagnostic.span.len() as usize).clamp(1, available);

    eprintln!("{:>padding$} {}{}", "|", " ".repeat(column), "^".repeat(underline));
}

fn remove_starting_whitespace(string: &str) -> (&str, usize) {
    let trimmed = string.trim_start_matches([' ', '\t']);
    (trimmed, string.len() - trimmed.len())
}

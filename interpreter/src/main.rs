use std::path::PathBuf;
use std::process::ExitCode;
use anyhow::{bail, Context, Result};
use compiler_core::{CompileOptions, CompilerSession};
use frontend::dot::{AstPrinter, ParseTreePrinter};
use frontend::{CompileError, ConstantPropagation, SourceCode};
use interpreter::error_formatter::ErrorFormatter;
use interpreter::evaluation::EvaluationContext;

const USAGE: &str = "usage: interpreter <file> [--tokens | --dump-parse-tree | --dump-ast] [--no-optimize] [param...]";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Dump {
    Tokens,
    ParseTree,
    Ast,
}

#[derive(Debug)]
struct Options {
    file: PathBuf,
    dump: Option<Dump>,
    optimize: bool,
    parameters: Vec<i64>,
}

fn parse_args(args: &[String]) -> Result<Options> {
    let mut file = None;
    let mut dump = None;
    let mut optimize = true;
    let mut parameters = vec![];

    for arg in args {
        let selected = match arg.as_str() {
            "--tokens" => Some(Dump::Tokens),
            "--dump-parse-tree" => Some(Dump::ParseTree),
            "--dump-ast" => Some(Dump::Ast),
            "--no-optimize" => {
                optimize = false;
                None
            }
            flag if flag.starts_with("--") => bail!("unknown option {flag}\n{USAGE}"),
            _ if file.is_none() => {
                file = Some(PathBuf::from(arg));
                None
            }
            value => {
                let parameter = value
                    .parse::<i64>()
                    .with_context(|| format!("parameter {value:?} is not a 64-bit integer"))?;
                parameters.push(parameter);
                None
            }
        };
        if let Some(selected) = selected {
            if dump.is_some() {
                bail!("only one of --tokens, --dump-parse-tree, --dump-ast may be given");
            }
            dump = Some(selected);
        }
    }

    let Some(file) = file else {
        bail!("{USAGE}");
    };
    Ok(Options { file, dump, optimize, parameters })
}

fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().skip(1).collect();
    match run(&args) {
        Ok(code) => code,
        Err(error) => {
            eprintln!("error: {error:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &[String]) -> Result<ExitCode> {
    let options = parse_args(args)?;
    let text = std::fs::read_to_string(&options.file)
        .with_context(|| format!("failed to read {}", options.file.display()))?;
    let source = SourceCode::new(&text);
    let formatter = ErrorFormatter::new(&source);
    let mut session = CompilerSession::with_options(CompileOptions {
        optimize: options.optimize,
        ..CompileOptions::default()
    });

    let output = match options.dump {
        Some(Dump::Tokens) => session.tokenize(&source).map(|tokens| {
            tokens
                .iter()
                .map(|token| format!("{}\t{}\n", token.location, token.kind))
                .collect::<String>()
        }),
        Some(Dump::ParseTree) => session
            .parse(&source)
            .map(|tree| ParseTreePrinter::new(&source).print(&tree)),
        Some(Dump::Ast) => dump_ast(&mut session, &source),
        None => {
            let function = match session.compile(&source) {
                Ok(function) => function,
                Err(error) => return Ok(report(&formatter, &error)),
            };
            match EvaluationContext::new(&function).evaluate_function(&options.parameters) {
                Ok(result) => Ok(format!("{result}\n")),
                Err(error) => {
                    eprint!("{}", formatter.format_runtime_error(&error));
                    return Ok(ExitCode::FAILURE);
                }
            }
        }
    };

    match output {
        Ok(output) => {
            print!("{output}");
            Ok(ExitCode::SUCCESS)
        }
        Err(error) => Ok(report(&formatter, &error)),
    }
}

fn dump_ast(session: &mut CompilerSession, source: &SourceCode) -> Result<String, CompileError> {
    let (mut function, _) = session.analyse(source)?;
    if session.options().optimize {
        ConstantPropagation::new().optimize(&mut function);
    }
    Ok(AstPrinter::new(session.string_interner()).print(&function))
}

fn report(formatter: &ErrorFormatter, error: &CompileError) -> ExitCode {
    eprint!("{}", formatter.format_compile_error(error));
    ExitCode::FAILURE
}

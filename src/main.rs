use clap::{ArgAction, CommandFactory, Parser, Subcommand, ValueEnum};
use color_eyre::eyre::{Result, WrapErr};
use std::path::{Path, PathBuf};
use std::{fs::read_to_string, process::ExitCode};
use tracing::Level;
use vslang::InterpretError;

const COMPILE_ERROR_CODE: u8 = 65;

#[derive(Debug, Parser)]
#[clap(name = "vslang", version, args_conflicts_with_subcommands = true)]
pub struct CLArgs {
    #[clap(subcommand)]
    pub routine: Option<VslangCommand>,
    /// Program to run.
    pub path: Option<PathBuf>,
    /// Increase log verbosity. Repeat for more detail.
    #[clap(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,
    #[clap(long = "error-format", value_enum, default_value = "pretty", global = true)]
    pub error_format: ErrorFormat,
}

#[derive(Debug, Subcommand)]
pub enum VslangCommand {
    /// Print the token stream of a program.
    Tokenize {
        path: PathBuf,
        #[clap(long = "format", value_enum, default_value = "basic")]
        format: TokenFormat,
    },
    /// Print the parsed program.
    Parse {
        path: PathBuf,
        #[clap(long = "format", value_enum, default_value = "sexpr")]
        format: ProgramFormat,
    },
    /// Run a program.
    Run { path: PathBuf },
}

#[derive(Debug, Clone, ValueEnum)]
pub enum TokenFormat {
    Debug,
    Basic,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum ProgramFormat {
    Debug,
    #[clap(name = "sexpr")]
    SExpr,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ErrorFormat {
    Basic,
    Pretty,
}

fn main() -> Result<ExitCode> {
    color_eyre::install()?;
    let args = CLArgs::parse();
    init_logging(args.verbose);

    let code = match (args.routine, args.path) {
        (Some(VslangCommand::Tokenize { path, format }), _) => {
            tracing::info!(?path, "tokenizing");
            let src = read_source(&path)?;
            tokenize(&src, &path, &format, args.error_format)
        }
        (Some(VslangCommand::Parse { path, format }), _) => {
            tracing::info!(?path, "parsing");
            let src = read_source(&path)?;
            parse(&src, &path, &format, args.error_format)
        }
        (Some(VslangCommand::Run { path }), _) | (None, Some(path)) => {
            tracing::info!(?path, "running");
            let src = read_source(&path)?;
            run(&src, &path, args.error_format)
        }
        (None, None) => {
            CLArgs::command().print_help()?;
            println!();
            ExitCode::SUCCESS
        }
    };
    Ok(code)
}

fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn read_source(path: &Path) -> Result<String> {
    read_to_string(path).wrap_err_with(|| format!("Failed to read source file {path:?}"))
}

fn tokenize(src: &str, path: &Path, format: &TokenFormat, error_format: ErrorFormat) -> ExitCode {
    use vslang::lexer::formatter::{
        BasicFormatter, DebugFormatter, PrettyFormatter, ToFormatter, TokenFormatter,
    };
    use vslang::lexer::{Lexer, TokenKind};

    let mut lexer = Lexer::new(src);
    let formatter: Box<dyn TokenFormatter> = match format {
        TokenFormat::Debug => Box::new(ToFormatter::<DebugFormatter>::create_formatter(&lexer)),
        TokenFormat::Basic => Box::new(ToFormatter::<BasicFormatter>::create_formatter(&lexer)),
    };
    let error_formatter: Box<dyn TokenFormatter> = match error_format {
        ErrorFormat::Basic => Box::new(BasicFormatter::new(src)),
        ErrorFormat::Pretty => Box::new(PrettyFormatter::new(src, path)),
    };

    let mut succeeded = true;
    loop {
        match lexer.next_token() {
            Ok(token) => {
                println!("{}", formatter.format(&token));
                if matches!(token.kind, TokenKind::Eof) {
                    break;
                }
            }
            Err(error) => {
                eprintln!("{}", error_formatter.format_lexical_error(&error));
                succeeded = false;
            }
        }
    }

    if succeeded {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(COMPILE_ERROR_CODE)
    }
}

fn parse(src: &str, path: &Path, format: &ProgramFormat, error_format: ErrorFormat) -> ExitCode {
    use vslang::parser::formatter::{DebugFormatter, ParserFormatter, SExpressionFormatter};
    use vslang::parser::Parser;

    let tokens = match vslang::lexer::Lexer::new(src).tokenize() {
        Ok(tokens) => tokens,
        Err(error) => return report(src, path, error_format, &error.into()),
    };
    let program = match Parser::new(tokens).parse() {
        Ok(program) => program,
        Err(error) => return report(src, path, error_format, &error.into()),
    };

    let formatter: Box<dyn ParserFormatter> = match format {
        ProgramFormat::Debug => Box::new(DebugFormatter),
        ProgramFormat::SExpr => Box::new(SExpressionFormatter::new(src)),
    };
    println!("{}", formatter.format_program(&program));
    ExitCode::SUCCESS
}

fn run(src: &str, path: &Path, error_format: ErrorFormat) -> ExitCode {
    use vslang::interpreter::context::StdioContext;

    match vslang::interpret(src, StdioContext::new()) {
        Ok(_) => ExitCode::SUCCESS,
        Err(error) => report(src, path, error_format, &error),
    }
}

/// Prints `error` to stderr and returns the matching exit code.
fn report(src: &str, path: &Path, error_format: ErrorFormat, error: &InterpretError) -> ExitCode {
    use vslang::lexer::formatter::{self as lexer_fmt, TokenFormatter};
    use vslang::parser::formatter::{self as parser_fmt, ParserFormatter};
    use vslang::value::formatter::{self as value_fmt, ValueFormatter};

    let message = match (error, error_format) {
        (InterpretError::Lexical(e), ErrorFormat::Basic) => {
            lexer_fmt::BasicFormatter::new(src).format_lexical_error(e)
        }
        (InterpretError::Lexical(e), ErrorFormat::Pretty) => {
            lexer_fmt::PrettyFormatter::new(src, path).format_lexical_error(e)
        }
        (InterpretError::Parser(e), ErrorFormat::Basic) => {
            parser_fmt::BasicFormatter::new(src).format_error(e)
        }
        (InterpretError::Parser(e), ErrorFormat::Pretty) => {
            parser_fmt::PrettyFormatter::new(src, path).format_error(e)
        }
        (InterpretError::Runtime(e), ErrorFormat::Basic) => {
            value_fmt::BasicFormatter::new(src).format_error(e)
        }
        (InterpretError::Runtime(e), ErrorFormat::Pretty) => {
            value_fmt::PrettyFormatter::new(src, path).format_error(e)
        }
    };
    eprintln!("{message}");
    tracing::debug!(code = error.code(), "aborted");
    ExitCode::from(error.exit_code())
}

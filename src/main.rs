use std::{io::Write, path::PathBuf, rc::Rc, time::Instant};

use colored::Colorize;
use thiserror::Error;

use mc::{
    parse,
    scan::{location::Source, scanner::Scanner},
    utils::{
        self,
        cli::{Args, CompilerAction},
        diagnostics::Diagnostic,
        formatting::token_table,
        graphviz,
    },
    FrontendError,
};

#[derive(Debug, Error)]
enum CommandError {
    #[error("cannot read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Frontend(#[from] FrontendError),
}

fn get_writer(output: &Option<PathBuf>) -> std::io::Result<Box<dyn Write>> {
    Ok(match output {
        Some(path) => Box::new(std::fs::File::create(path)?),
        None => Box::new(std::io::stdout()),
    })
}

fn main() {
    let args = utils::cli::parse();
    if let Err(e) = run(&args) {
        match &e {
            CommandError::Frontend(e) => {
                // Nothing sensible is left to do if stderr is gone.
                let _ = Diagnostic::from(e).write(&mut std::io::stderr());
            }
            e => eprintln!("{}: {}", "error".red().bold(), e),
        }
        std::process::exit(1);
    }
}

fn run(args: &Args) -> Result<(), CommandError> {
    if args.debug {
        eprintln!(
            "Filename: {:?}\nTarget: {:?}\nOutput File: {:?}\nDot File: {:?}\nShow: {:?}",
            args.input, args.target, args.output, args.dot, args.show
        );
    }
    let content = std::fs::read_to_string(&args.input).map_err(|source| CommandError::Read {
        path: args.input.clone(),
        source,
    })?;
    let source = Rc::new(Source::new(args.input.to_string_lossy(), &content));
    let mut writer = get_writer(&args.output)?;

    let started = Instant::now();
    let tokens = Scanner::new(source)
        .tokenize()
        .map_err(FrontendError::from)?;
    if args.debug {
        eprintln!("Scanned {} tokens in {:?}", tokens.len(), started.elapsed());
    }
    if args.target == CompilerAction::Scan {
        write!(writer, "{}", token_table(&tokens))?;
        return Ok(());
    }

    let started = Instant::now();
    let tree = parse::parse(tokens).map_err(FrontendError::from)?;
    if args.debug {
        eprintln!("Parsed {} nodes in {:?}", tree.size(), started.elapsed());
    }
    write!(writer, "{}", tree)?;
    writeln!(writer, "Program is syntactically correct.")?;

    if args.dot.is_some() || args.show {
        let dot = graphviz::to_dot(&tree);
        if let Some(path) = &args.dot {
            std::fs::write(path, &dot)?;
        }
        if args.show {
            let path = graphviz::show_graphviz(&dot)?;
            if args.debug {
                eprintln!("Parse tree rendered to {}", path.display());
            }
        }
    }
    Ok(())
}

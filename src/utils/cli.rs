//! Command-line interface of the `mc` driver. Recognizes the `--target`,
//! `--debug`, `-o`, `--dot` and `--show` switches.
use clap::Parser;

#[derive(Clone, Copy, clap::ValueEnum, Debug, PartialEq, Eq)]
pub enum CompilerAction {
    /// Print the token table
    Scan,
    /// Print the parse tree
    Parse,
}

#[derive(Parser, Debug)]
#[command(version, about = "Scanner and parser for .mc programs")]
pub struct Args {
    /// run up to the given stage
    #[arg(short, long, value_enum, default_value_t = CompilerAction::Parse, value_name = "stage")]
    pub target: CompilerAction,

    /// write output to
    #[arg(short = 'o', long, value_name = "outname")]
    pub output: Option<std::path::PathBuf>,

    /// also write the parse tree as a Graphviz DOT file
    #[arg(long, value_name = "file")]
    pub dot: Option<std::path::PathBuf>,

    /// render the parse tree with `dot` and open it in the default viewer
    #[arg(long, default_value_t = false)]
    pub show: bool,

    /// Print debugging information
    #[arg(short, long, default_value_t = false)]
    pub debug: bool,

    /// Source file
    #[arg(default_value = "programa.mc")]
    pub input: std::path::PathBuf,
}

pub fn parse() -> Args {
    Args::parse()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let args = Args::try_parse_from(["mc"]).unwrap();
        assert_eq!(args.target, CompilerAction::Parse);
        assert_eq!(args.input, std::path::PathBuf::from("programa.mc"));
        assert!(args.output.is_none() && args.dot.is_none());
        assert!(!args.show && !args.debug);
    }

    #[test]
    fn switches() {
        let args =
            Args::try_parse_from(["mc", "-t", "scan", "-o", "out.txt", "--dot", "t.dot", "-d", "p.mc"])
                .unwrap();
        assert_eq!(args.target, CompilerAction::Scan);
        assert_eq!(args.output.unwrap(), std::path::PathBuf::from("out.txt"));
        assert_eq!(args.dot.unwrap(), std::path::PathBuf::from("t.dot"));
        assert!(args.debug);
        assert_eq!(args.input, std::path::PathBuf::from("p.mc"));
    }
}

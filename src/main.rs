use std::fs::File;
use std::io::{self, BufReader};
use std::path::PathBuf;
use std::process;

use log::{info, LevelFilter};
use structopt::StructOpt;

use edmonds_karp::session::{report, Options, Session};
use edmonds_karp::{Error, Network};

#[derive(StructOpt, Debug)]
#[structopt(
    name = "edmonds-karp",
    about = "Computes the maximum flow from the first to the last node of a network"
)]
struct Opt {
    /// Read the network from a file instead of prompting for it. The
    /// first line holds the node count, each following line one arc
    /// as `<origin> <destination> <capacity>`.
    #[structopt(short, long, parse(from_os_str))]
    input: Option<PathBuf>,
    /// Fail instead of using more augmenting paths than this
    #[structopt(long)]
    max_augmentations: Option<usize>,
    /// Also print the flow on each arc and a minimum cut
    #[structopt(long)]
    cut: bool,
    /// Increase log verbosity, may be repeated
    #[structopt(short, long, parse(from_occurrences))]
    verbose: u8,
}

fn init_logger(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };

    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}

fn run(opt: &Opt) -> Result<(), Error> {
    let options = Options {
        max_augmentations: opt.max_augmentations,
        show_cut: opt.cut,
    };

    let stdout = io::stdout();
    let mut out = stdout.lock();

    let network = match &opt.input {
        Some(path) => {
            info!("reading network from {}", path.display());
            let mut reader = BufReader::new(File::open(path)?);
            Network::from_reader(&mut reader)?
        }
        None => {
            let stdin = io::stdin();
            let mut session = Session::new(stdin.lock(), &mut out);
            session.banner()?;
            session.read_network()?
        }
    };

    report(&mut out, &network, &options)?;
    Ok(())
}

fn main() {
    let opt = Opt::from_args();
    init_logger(opt.verbose);

    if let Err(err) = run(&opt) {
        eprintln!("error: {}", err);
        process::exit(1);
    }
}

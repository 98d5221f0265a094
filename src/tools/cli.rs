use clap::Parser;
use log::info;
use std::{fmt::Display, fmt::Formatter};

/// Verbosity of user information
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verbosity {
    Quiet,
    Errors,
    Warnings,
    Info,
    Debug,
    Trace,
}

/// Zip, Unzip, Test
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Zip,
    Unzip,
    Test,
}
impl Display for Mode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// Define the two output channels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Output {
    File,
    Stdout,
}
impl Display for Output {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// Entropy coder used after the zero-length encoding stage
#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum Backend {
    /// Canonical Huffman code, one table per block
    Huffman,
    /// Adaptive arithmetic coder
    Arith,
}

impl Backend {
    /// Tag byte identifying the backend in a compressed stream.
    pub fn tag(self) -> u8 {
        match self {
            Backend::Huffman => b'h',
            Backend::Arith => b'a',
        }
    }

    pub fn from_tag(tag: u8) -> Option<Self> {
        match tag {
            b'h' => Some(Backend::Huffman),
            b'a' => Some(Backend::Arith),
            _ => None,
        }
    }
}

impl Display for Backend {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

#[derive(Debug)]
pub struct BwzOpts {
    /// Entropy coder used when compressing
    pub backend: Backend,
    /// Block size level, 1..9 (times 100k)
    pub block_size: u8,
    /// Vec of names of files to read for input
    pub files: Vec<String>,
    /// Silently overwrite existing files with the same name
    pub force_overwrite: bool,
    /// Don't remove input files after processing
    pub keep_input_files: bool,
    /// Compress/Decompress/Test
    pub op_mode: Mode,
    /// Location where output is sent
    pub output: Output,
    /// Verbosity of user information
    pub verbose: Verbosity,
}

impl BwzOpts {
    pub fn new() -> Self {
        Self {
            backend: Backend::Arith,
            block_size: 9,
            files: vec![],
            force_overwrite: false,
            keep_input_files: false,
            op_mode: Mode::Zip,
            output: Output::File,
            verbose: Verbosity::Errors,
        }
    }
}

impl Default for BwzOpts {
    fn default() -> Self {
        Self::new()
    }
}

/// Command Line Interpretation - uses external CLAP crate.
#[derive(Parser, Debug)]
#[clap(
    version,
    about = "bwz, a block-sorting file compressor",
    long_about = "
    bwz sorts each block with a suffix tree Burrows-Wheeler transform, then applies a
    move-to-front-2 pass, zero-length encoding and either a Huffman or an adaptive
    arithmetic coder.

    If no file names are given, bwz works from standard input to standard output."
)]
struct Args {
    /// Files to process
    #[clap()]
    files: Vec<String>,

    /// Perform compression on the input files (default)
    #[clap(short = 'z', long = "compress")]
    compress: bool,

    /// Perform decompression on the input files
    #[clap(short = 'd', long = "decompress")]
    decompress: bool,

    /// Test compressed file integrity
    #[clap(short = 't', long = "test")]
    test: bool,

    /// Keep input files
    #[clap(short = 'k', long = "keep")]
    keep: bool,

    /// Force overwriting output files
    #[clap(short = 'f', long = "force")]
    force: bool,

    /// Send output to the terminal
    #[clap(short = 'c', long = "stdout")]
    stdout: bool,

    /// Entropy coder used when compressing
    #[clap(long, value_enum, default_value = "arith")]
    backend: Backend,

    /// 1..9 - Set the block size from 100-900k. 900k is the default
    #[clap(short = 'b', long = "block-size", value_parser = clap::value_parser!(u8).range(1..=9))]
    block_size: Option<u8>,

    /// Alias for 100k block mode
    #[clap(long = "fast")]
    fast: bool,

    /// Alias for 900k block mode
    #[clap(long = "best")]
    best: bool,

    /// Be verbose (a 2nd -v gives more)
    #[clap(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress noncritical error messages
    #[clap(short = 'q', long = "quiet")]
    quiet: bool,
}

/// Parse the process arguments, set the log level and report what we are about to do.
pub fn bwzopts_init() -> BwzOpts {
    let opts = bwzopts_from(Args::parse());

    // Set the log level
    match opts.verbose {
        Verbosity::Quiet => log::set_max_level(log::LevelFilter::Off),
        Verbosity::Errors => log::set_max_level(log::LevelFilter::Error),
        Verbosity::Warnings => log::set_max_level(log::LevelFilter::Warn),
        Verbosity::Info => log::set_max_level(log::LevelFilter::Info),
        Verbosity::Debug => log::set_max_level(log::LevelFilter::Debug),
        Verbosity::Trace => log::set_max_level(log::LevelFilter::Trace),
    };

    info!("---- bwz Initialization Start ----");
    info!("Verbosity set to {}", log::max_level());
    info!("Operational mode set to {}", opts.op_mode);
    info!("Backend set to {}", opts.backend);
    info!("Block size set to {}", opts.block_size);
    info!("Output sent to {}", opts.output);
    if opts.force_overwrite {
        info!("Forcing file overwriting")
    };
    if opts.keep_input_files {
        info!("Keeping input files")
    };
    info!("---- bwz Initialization End ----\n");

    opts
}

/// Put command line information from CLAP into our internal structure.
fn bwzopts_from(args: Args) -> BwzOpts {
    let mut opts = BwzOpts::new();
    opts.files = args.files;
    opts.backend = args.backend;
    opts.force_overwrite = args.force;
    opts.keep_input_files = args.keep;

    if args.decompress {
        opts.op_mode = Mode::Unzip
    };
    if args.test {
        opts.op_mode = Mode::Test
    };
    // An explicit -z wins over -d and -t
    if args.compress {
        opts.op_mode = Mode::Zip
    };

    if args.stdout {
        opts.output = Output::Stdout
    };

    if args.fast {
        opts.block_size = 1
    };
    if args.best {
        opts.block_size = 9
    };
    // NOTE: This overwrites the fast and best flags!
    if let Some(level) = args.block_size {
        opts.block_size = level
    };

    opts.verbose = if args.quiet {
        Verbosity::Quiet
    } else {
        match args.verbose {
            0 => Verbosity::Errors,
            1 => Verbosity::Warnings,
            2 => Verbosity::Info,
            3 => Verbosity::Debug,
            _ => Verbosity::Trace,
        }
    };

    opts
}

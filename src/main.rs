//Enable more cargo lint tests
#![warn(rust_2018_idioms)]
#![warn(clippy::disallowed_types)]

use std::{
    fs::{self, File},
    io::{self, Read, Write},
    path::Path,
};

use bwz::compression::compress::{compress, decompress, CompressOptions};
use bwz::tools::cli::{bwzopts_init, BwzOpts, Mode, Output};

use log::{error, info, LevelFilter};
use simplelog::{ColorChoice, Config, TermLogger, TerminalMode};

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

const SUFFIX: &str = ".bwz";

fn main() -> Result<(), std::io::Error> {
    // Available log levels are Error, Warn, Info, Debug, Trace
    TermLogger::init(
        LevelFilter::Trace,
        Config::default(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    )
    .map_err(|e| io::Error::new(io::ErrorKind::Other, e))?;

    let options = bwzopts_init();

    //----- Figure how what we need to do and go do it
    let result = if options.files.is_empty() {
        process_stdin(&options)
    } else {
        options
            .files
            .iter()
            .try_for_each(|name| process_file(&options, name))
    };

    if let Err(e) = &result {
        error!("{}", e);
    }
    info!("Done.\n");
    result
}

/// Compress or decompress a whole buffer according to the options.
fn run(opts: &BwzOpts, data: &[u8]) -> io::Result<Vec<u8>> {
    let result = match opts.op_mode {
        Mode::Zip => compress(
            data,
            &CompressOptions {
                backend: opts.backend,
                block_level: opts.block_size,
            },
        ),
        Mode::Unzip | Mode::Test => decompress(data),
    };
    result.map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
}

/// Name of the file we write for `name`.
fn output_name(name: &str, mode: Mode) -> String {
    match mode {
        Mode::Unzip => match name.strip_suffix(SUFFIX) {
            Some(stem) if !stem.is_empty() => stem.to_string(),
            _ => format!("{}.out", name),
        },
        _ => format!("{}{}", name, SUFFIX),
    }
}

fn process_file(opts: &BwzOpts, name: &str) -> io::Result<()> {
    let mut data = Vec::new();
    File::open(name)?.read_to_end(&mut data)?;
    info!("Read {} bytes from {}", data.len(), name);

    let result = run(opts, &data)?;

    if opts.op_mode == Mode::Test {
        info!("{}: ok", name);
        return Ok(());
    }

    match opts.output {
        Output::Stdout => io::stdout().lock().write_all(&result)?,
        Output::File => {
            let out_name = output_name(name, opts.op_mode);
            if Path::new(&out_name).exists() && !opts.force_overwrite {
                return Err(io::Error::new(
                    io::ErrorKind::AlreadyExists,
                    format!("output file {} already exists", out_name),
                ));
            }
            fs::write(&out_name, &result)?;
            info!("Wrote {} bytes to {}", result.len(), out_name);

            if !opts.keep_input_files {
                fs::remove_file(name)?;
            }
        }
    }
    Ok(())
}

/// With no files named, read standard input and write standard output.
fn process_stdin(opts: &BwzOpts) -> io::Result<()> {
    let mut data = Vec::new();
    io::stdin().lock().read_to_end(&mut data)?;
    let result = run(opts, &data)?;
    if opts.op_mode != Mode::Test {
        io::stdout().lock().write_all(&result)?;
    }
    Ok(())
}

#[cfg(test)]
mod test {
    use super::output_name;
    use bwz::tools::cli::Mode;

    #[test]
    fn output_name_test() {
        assert_eq!(output_name("a.txt", Mode::Zip), "a.txt.bwz");
        assert_eq!(output_name("a.txt.bwz", Mode::Unzip), "a.txt");
        assert_eq!(output_name("a.txt", Mode::Unzip), "a.txt.out");
        assert_eq!(output_name(".bwz", Mode::Unzip), ".bwz.out");
    }
}

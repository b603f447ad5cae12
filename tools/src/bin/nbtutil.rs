use clap::{App, AppSettings, Arg, ArgMatches, SubCommand};
use log::debug;

use nbtree::coder::{load_file, save_file, CompressionFormat};
use nbtree::error::Result;
use nbtree::order::ByteOrder;
use nbtree::print::{render, Style};
use nbtree::{parse, to_bytes, to_compressed_bytes};

fn order_arg() -> Arg<'static, 'static> {
    Arg::with_name("order")
        .long("order")
        .alias("endian")
        .alias("byte_order")
        .short("e")
        .takes_value(true)
        .possible_values(&["native", "little", "big"])
        .default_value("native")
        .help("byte order of the nbt data")
}

fn path_arg() -> Arg<'static, 'static> {
    Arg::with_name("path")
        .long("path")
        .short("p")
        .takes_value(true)
        .required(true)
        .help("file containing the nbt data")
}

fn uncompressed_arg() -> Arg<'static, 'static> {
    Arg::with_name("uncompressed")
        .long("uncompressed")
        .short("u")
        .help("treat the input as raw nbt rather than gzip/zlib data")
}

fn main() {
    env_logger::init();

    let matches = App::new("nbtutil")
        .about("inspect and rewrite nbt data")
        .setting(AppSettings::SubcommandRequiredElseHelp)
        .subcommand(
            SubCommand::with_name("dump")
                .about("print a readable form of the nbt data at <path>")
                .arg(path_arg())
                .arg(order_arg())
                .arg(uncompressed_arg())
                .arg(
                    Arg::with_name("style")
                        .long("style")
                        .short("s")
                        .takes_value(true)
                        .possible_values(&["original", "pipe", "color"])
                        .default_value("original")
                        .help("layout of the dump"),
                ),
        )
        .subcommand(
            SubCommand::with_name("edit")
                .about("parse the nbt data at <path> and write it back out")
                .arg(path_arg())
                .arg(order_arg())
                .arg(uncompressed_arg())
                .arg(
                    Arg::with_name("output")
                        .long("output")
                        .short("o")
                        .takes_value(true)
                        .help("where to write the result, defaults to the input file"),
                ),
        )
        .get_matches();

    let result = match matches.subcommand() {
        ("dump", Some(m)) => dump(m),
        ("edit", Some(m)) => edit(m),
        _ => unreachable!("subcommand is required"),
    };

    if let Err(e) = result {
        eprintln!("nbtutil: {}", e);
        std::process::exit(1);
    }
}

fn parse_order(matches: &ArgMatches) -> ByteOrder {
    match matches.value_of("order") {
        Some("little") => ByteOrder::Little,
        Some("big") => ByteOrder::Big,
        _ => ByteOrder::native(),
    }
}

fn dump(matches: &ArgMatches) -> Result<()> {
    let path = matches.value_of("path").unwrap();
    let order = parse_order(matches);
    let compressed = !matches.is_present("uncompressed");
    let style = match matches.value_of("style") {
        Some("pipe") => Style::Pipe,
        Some("color") => Style::Color,
        _ => Style::Original,
    };

    debug!("dumping {} ({:?}, compressed: {})", path, order, compressed);
    let data = load_file(path)?;
    let tag = parse(&data, order, compressed)?;
    print!("{}", render(&tag, style));
    Ok(())
}

fn edit(matches: &ArgMatches) -> Result<()> {
    let path = matches.value_of("path").unwrap();
    let order = parse_order(matches);
    let compressed = !matches.is_present("uncompressed");
    let output = match matches.value_of("output") {
        Some(out) => out,
        None => {
            println!("No output path was given, writing back to the input file");
            path
        }
    };

    let data = load_file(path)?;
    let tag = parse(&data, order, compressed)?;

    // Write the result back in the same container the input arrived in.
    let out = if compressed {
        to_compressed_bytes(&tag, order, CompressionFormat::sniff(&data))?
    } else {
        to_bytes(&tag, order)?
    };
    save_file(&out, output)?;
    debug!("wrote {} bytes to {}", out.len(), output);
    Ok(())
}

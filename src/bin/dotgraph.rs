//! This is the command line tool that loads '.dot' files, checks them, and
//! writes them back in the canonical DOT form.

extern crate clap;
extern crate env_logger;
extern crate log;

use clap::{Arg, ArgAction, Command};
use dotgraph::core::utils::save_to_file;
use dotgraph::graph::Graph;
use dotgraph::gv;
use gv::parser::DotParser;
use std::fs;
use std::process::exit;

struct CLIOptions {
    input_path: String,
    output_path: Option<String>,
    summary: bool,
    debug_mode: bool,
}

impl CLIOptions {
    pub fn new() -> Self {
        Self {
            input_path: String::new(),
            output_path: None,
            summary: false,
            debug_mode: false,
        }
    }
}

fn write_graph(graph: &Graph, options: &CLIOptions) -> bool {
    let content = graph.to_dot();

    let path = match &options.output_path {
        Some(path) => path,
        None => {
            print!("{}", content);
            return true;
        }
    };

    let res = save_to_file(path, &content);
    if let Result::Err(err) = res {
        log::error!("Could not write the file {}", path);
        log::error!("Error {}", err);
        return false;
    }
    log::info!("Wrote {}", path);
    true
}

fn main() {
    let matches = Command::new("dotgraph")
        .version("0.1.0")
        .about("Parses a GraphViz file and writes it in canonical DOT form")
        .arg(
            Arg::new("debug")
                .short('d')
                .long("debug")
                .action(ArgAction::SetTrue)
                .help("Enables debug logging"),
        )
        .arg(
            Arg::new("summary")
                .short('s')
                .long("summary")
                .action(ArgAction::SetTrue)
                .help("Print a summary of the graph hierarchy"),
        )
        .arg(
            Arg::new("output")
                .short('o')
                .long("output")
                .value_name("FILE")
                .help("Path of the output file (default: stdout)"),
        )
        .arg(
            Arg::new("INPUT")
                .help("Sets the input file to use")
                .required(true)
                .index(1),
        )
        .get_matches();

    let mut cli = CLIOptions::new();
    cli.debug_mode = matches.get_flag("debug");
    cli.summary = matches.get_flag("summary");
    cli.output_path = matches.get_one::<String>("output").cloned();
    if let Some(input) = matches.get_one::<String>("INPUT") {
        cli.input_path = input.clone();
    }

    let mut logger = env_logger::builder();
    logger.format_timestamp(None);
    if cli.debug_mode {
        logger.filter_level(log::LevelFilter::Debug);
    }
    logger.init();

    let contents = match fs::read_to_string(&cli.input_path) {
        Ok(contents) => contents,
        Err(err) => {
            log::error!("Can't open the file {}", cli.input_path);
            log::error!("Error {}", err);
            exit(1);
        }
    };

    let mut parser = DotParser::new(&contents);
    let tree = parser.process();

    match tree {
        Result::Err(err) => {
            if let Some(diag) = parser.format_error(&err) {
                eprint!("{}", diag);
            }
            log::error!("Error: {}", err);
            exit(1);
        }

        Result::Ok(g) => {
            if cli.summary {
                gv::dump_graph(&g);
            }
            if !write_graph(&g, &cli) {
                exit(1);
            }
        }
    }
}

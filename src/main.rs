extern crate clap;

use std::process;

use clap::{App, Arg, ArgMatches};
use crossword_gen::{find_fill, render_grid, render_image, Crossword, SolveOptions};
use log::info;

fn run(matches: &ArgMatches) -> crossword_gen::Result<()> {
    let structure = matches.value_of("structure").expect("structure is required");
    let words = matches.value_of("words").expect("words is required");

    let crossword = Crossword::load(structure, words)?;
    let options = SolveOptions {
        initial_arc_consistency: !matches.is_present("no-ac3"),
        maintain_arc_consistency: matches.is_present("mac"),
    };

    let result = match find_fill(&crossword, &options) {
        Some(result) => result,
        None => {
            println!("No solution.");
            return Ok(());
        }
    };

    info!("{:?}", result.statistics);
    let display_grid = render_grid(&crossword, &result.assignment);
    println!("{}", display_grid);

    if let Some(output) = matches.value_of("output") {
        render_image(&crossword, &result.assignment, output)?;
        info!("saved grid image to {}", output);
    }

    Ok(())
}

fn main() {
    env_logger::init();

    let matches = App::new("generate")
        .about("Fill a crossword structure with words from a word list")
        .arg(
            Arg::with_name("structure")
                .value_name("STRUCTURE")
                .help("Structure file, with _ marking open cells")
                .required(true)
                .index(1),
        )
        .arg(
            Arg::with_name("words")
                .value_name("WORDS")
                .help("Word list, one word per line")
                .required(true)
                .index(2),
        )
        .arg(
            Arg::with_name("output")
                .value_name("OUTPUT")
                .help("Also save the filled grid as an image, e.g. output.png")
                .index(3),
        )
        .arg(
            Arg::with_name("mac")
                .long("mac")
                .help("Maintain arc consistency after every choice during the search"),
        )
        .arg(
            Arg::with_name("no-ac3")
                .long("no-ac3")
                .help("Skip arc consistency before the search"),
        )
        .get_matches();

    if let Err(err) = run(&matches) {
        eprintln!("error: {}", err);
        process::exit(1);
    }
}

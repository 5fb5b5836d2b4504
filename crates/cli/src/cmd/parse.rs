use notegraph_core::parse_document;
use notegraph_core::vault::read_document;

use super::output::print_json;
use crate::ParseArgs;

pub fn run(args: ParseArgs) {
    let content = match read_document(&args.file) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error reading {}: {}", args.file.display(), e);
            std::process::exit(1);
        }
    };

    print_json(&parse_document(&content));
}

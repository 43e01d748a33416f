//! ravello-publish - clone a template image into an existing Ravello application

use clap::Parser;

use ravello_publish::cli::{Cli, exit_code, init_tracing};
use ravello_publish::output::OutputContext;

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    let ctx = OutputContext::new(cli.no_color, cli.quiet);
    if let Err(e) = cli.run(&ctx) {
        ctx.error(&format!("Error: {e:#}"));
        std::process::exit(exit_code(&e));
    }
}

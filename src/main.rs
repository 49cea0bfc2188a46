mod cmd;
mod opt;
mod repl;

use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use clap::Parser;
use monkey_interp::Session;

// Only installs a subscriber when RUST_LOG is set, e.g.
// `RUST_LOG=monkey_interp=trace`.
fn init_tracing() {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    if std::env::var("RUST_LOG").is_ok() {
        tracing_subscriber::registry()
            .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
            .with(EnvFilter::from_default_env())
            .init();
    }
}

fn main() {
    init_tracing();
    let options = opt::Options::parse();

    // Ctrl-C while evaluating stops the evaluation instead of the process.
    let interrupt = Arc::new(AtomicBool::new(false));
    if let Err(e) = signal_hook::flag::register(signal_hook::SIGINT, Arc::clone(&interrupt)) {
        eprintln!("warning: failed to install the Ctrl-C handler ({})", e);
    }

    let mut session = Session::with_interrupt(interrupt);
    match opt::load_startup_files(&options, &mut session) {
        opt::Startup::Repl => repl::read_eval_print_loop(session, &options),
        opt::Startup::Exit => {},
        opt::Startup::Failed => std::process::exit(1),
    }
}

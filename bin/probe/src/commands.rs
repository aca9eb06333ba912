use clap::Subcommand;
use clap_handler::Handler;

mod failover;
mod window;

#[derive(Subcommand, Clone, Handler)]
pub enum ProbeCommand {
    Window(window::WindowCommand),
    Failover(failover::FailoverCommand),
}

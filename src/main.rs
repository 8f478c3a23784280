use rtt_card::{config::DemoConfig, flow};

fn main() {
    if let Err(e) = flow::run(DemoConfig::default()) {
        log::error!("{:#}", e);
        std::process::exit(1);
    }
}

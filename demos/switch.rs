//! Switch outputs on an MHUB matrix and report the confirmed routing.
//!
//! Usage: cargo run --example switch -- <base-url> <output>=<input>...
//!
//!     cargo run --example switch -- http://10.0.0.60 a=4 c=3

use hdanywhere_mhub::{Input, MhubClient, Output, RoutingTable, StatusSnapshot, Switcher};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    let mut args = std::env::args().skip(1);
    let base_url = args.next().ok_or("usage: switch <base-url> <output>=<input>...")?;

    let mut target = RoutingTable::new();
    for pair in args {
        let (output, input) = pair
            .split_once('=')
            .ok_or_else(|| format!("expected <output>=<input>, got {pair}"))?;
        let output = Output::from_token(output).ok_or_else(|| format!("bad output: {output}"))?;
        let input = Input::from_token(input).ok_or_else(|| format!("bad input: {input}"))?;
        target.insert(output, input);
    }

    let switcher = Switcher::new(MhubClient::new(&base_url)?);
    let outcome = switcher.apply_routing(&target).await;

    for err in &outcome.errors {
        eprintln!("error: {err}");
    }
    match outcome.snapshot {
        StatusSnapshot::Online(routing) => {
            for (output, input) in &routing {
                println!("{output} <- {input}");
            }
        }
        StatusSnapshot::Offline => eprintln!("device did not confirm the new routing"),
    }

    Ok(())
}

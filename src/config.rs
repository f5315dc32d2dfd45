use {
    clap::{
        crate_authors,
        crate_description,
        crate_name,
        crate_version,
        Args,
        Parser,
    },
    std::time::Duration,
};

pub mod server;

#[derive(Parser, Debug)]
#[command(name = crate_name!())]
#[command(author = crate_authors!())]
#[command(about = crate_description!())]
#[command(version = crate_version!())]
pub enum Options {
    /// Run the auction server.
    Run(RunOptions),
}

#[derive(Args, Clone, Debug)]
pub struct RunOptions {
    /// Server Options
    #[command(flatten)]
    pub server: server::Options,

    #[command(flatten)]
    pub engine: EngineOptions,
}

#[derive(Args, Clone, Debug)]
#[command(next_help_heading = "Engine Options")]
#[group(id = "Engine")]
pub struct EngineOptions {
    /// How long an auction stays open after creation.
    #[arg(long = "auction-interval")]
    #[arg(env = "AUCTION_INTERVAL")]
    #[arg(default_value = "5m")]
    #[arg(value_parser = humantime::parse_duration)]
    pub auction_interval: Duration,

    /// Period of the background sweep that completes expired auctions.
    #[arg(long = "auction-close-check-interval")]
    #[arg(env = "AUCTION_CLOSE_CHECK_INTERVAL")]
    #[arg(default_value = "10s")]
    #[arg(value_parser = humantime::parse_duration)]
    pub auction_close_check_interval: Duration,

    /// Time trigger for flushing buffered bids to the store.
    #[arg(long = "batch-insert-interval")]
    #[arg(env = "BATCH_INSERT_INTERVAL")]
    #[arg(default_value = "3m")]
    #[arg(value_parser = humantime::parse_duration)]
    pub batch_insert_interval: Duration,

    /// Size trigger for flushing buffered bids, also the intake channel capacity.
    #[arg(long = "max-batch-size")]
    #[arg(env = "MAX_BATCH_SIZE")]
    #[arg(default_value = "5")]
    pub max_batch_size: usize,

    /// Allow the current highest bidder to raise their own bid.
    #[arg(long = "allow-self-outbid")]
    #[arg(env = "ALLOW_SELF_OUTBID")]
    #[arg(default_value = "false")]
    #[arg(value_parser = parse_truthy)]
    pub allow_self_outbid: bool,
}

fn parse_truthy(value: &str) -> Result<bool, std::convert::Infallible> {
    Ok(matches!(
        value.to_ascii_lowercase().as_str(),
        "true" | "1" | "yes"
    ))
}

#[cfg(test)]
mod tests {
    use super::parse_truthy;

    #[test]
    fn truthy_values_enable_the_flag() {
        for value in ["true", "1", "yes", "TRUE", "Yes"] {
            assert!(parse_truthy(value).unwrap(), "{value} should be truthy");
        }
    }

    #[test]
    fn other_values_disable_the_flag() {
        for value in ["false", "0", "no", "", "on", "enabled"] {
            assert!(!parse_truthy(value).unwrap(), "{value} should be falsy");
        }
    }
}

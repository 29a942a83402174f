use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "craftylink")]
#[command(about = "Cache-aside trend backend for YouTube, Naver, Kakao, Google and Pexels.")]
#[command(version)]
pub struct Cli {
    /// Address to listen on, overrides [server] bind
    #[arg(short = 'b', long)]
    pub bind: Option<String>,

    /// Show store location and cached entries
    #[arg(long)]
    pub status: bool,

    /// Delete cache entries older than HOURS
    #[arg(long, value_name = "HOURS")]
    pub prune: Option<u64>,

    /// Generate config sample
    #[arg(long)]
    pub generate_config: bool,

    /// Look up Naver news once and print it as JSON
    #[arg(long, value_name = "QUERY")]
    pub news: Option<String>,
}

use clap::Parser;

#[derive(Parser)]
#[command(version, about = "Convert a proxy node list into a sing-box config", long_about = None)]
pub struct Args {
    #[arg(
        short,
        long,
        default_value = "node.txt",
        help = "Node list file, one proxy URI per line"
    )]
    pub input: String,

    #[arg(short, long, default_value = "config.json", help = "Config output path")]
    pub output: String,

    #[arg(
        short = 'p',
        long,
        default_value_t = 40000,
        help = "Port the free-port scan starts from"
    )]
    pub start_port: u16,

    #[arg(short, long, help = "Emit debug log")]
    pub verbose: bool,
}

use pokearena::{run, CliOptions};
use std::env;

fn usage() -> ! {
    eprintln!(
        "Usage: cargo run --release -- --team NAME,NAME,NAME [--pool NAME,NAME,...] \
[--chain NAME] [--import N] [--seed SEED] [--base-url URL]"
    );
    std::process::exit(1);
}

fn parse_names(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|name| name.trim().to_ascii_lowercase())
        .filter(|name| !name.is_empty())
        .collect()
}

fn parse_args() -> anyhow::Result<CliOptions> {
    let mut team = Vec::new();
    let mut pool = Vec::new();
    let mut chain = None;
    let mut import_limit = 0usize;
    let mut seed = 0u64;
    let mut base_url = pokearena::remote::DEFAULT_BASE_URL.to_string();

    let mut args = env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--team" => {
                let val = args.next().ok_or_else(|| {
                    anyhow::anyhow!("--team requires names (e.g. --team pikachu,onix,gengar)")
                })?;
                team = parse_names(&val);
            }
            "--pool" => {
                let val = args
                    .next()
                    .ok_or_else(|| anyhow::anyhow!("--pool requires a comma-separated list"))?;
                pool = parse_names(&val);
            }
            "--chain" => {
                let val = args
                    .next()
                    .ok_or_else(|| anyhow::anyhow!("--chain requires a creature name"))?;
                chain = Some(val.trim().to_ascii_lowercase());
            }
            "--import" => {
                let val = args
                    .next()
                    .ok_or_else(|| anyhow::anyhow!("--import requires a number"))?;
                import_limit = val.parse()?;
            }
            "--seed" => {
                let val = args
                    .next()
                    .ok_or_else(|| anyhow::anyhow!("--seed requires a number"))?;
                seed = val.parse()?;
            }
            "--base-url" => {
                base_url = args
                    .next()
                    .ok_or_else(|| anyhow::anyhow!("--base-url requires a URL"))?;
            }
            "--help" | "-h" => usage(),
            other => return Err(anyhow::anyhow!("Unknown argument {other}")),
        }
    }

    if team.is_empty() && chain.is_none() {
        usage();
    }
    Ok(CliOptions {
        team,
        pool,
        chain,
        import_limit,
        seed,
        base_url,
    })
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();
    let opts = parse_args()?;
    run(opts)
}

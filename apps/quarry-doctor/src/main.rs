use clap::Parser;

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
	color_eyre::install()?;
	let args = quarry_doctor::Args::parse();
	quarry_doctor::run(args).await
}

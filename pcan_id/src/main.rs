mod action;
mod cli;

use std::{
	io::{self, Write},
	process::ExitCode,
};

use anyhow::{Context, Result, bail};
use clap::Parser;
use futures_lite::future;
use pcan::{Session, enumerate};
use tracing::debug;

use crate::cli::{Action, Cli};

fn main() -> Result<ExitCode> {
	trace::setup();

	let cli = match Cli::try_parse() {
		Ok(it) => it,
		Err(err) => {
			err.print()?;
			return Ok(ExitCode::from(cli::exit_status(&err)));
		}
	};

	future::block_on(run(&cli))?;

	Ok(ExitCode::SUCCESS)
}

async fn run(cli: &Cli) -> Result<()> {
	let Some(action) = cli.action() else {
		bail!("Please specify either -l, -q, -s or -i");
	};

	debug!(?action, index = cli.index, "Starting");

	let devices = enumerate::system_devices()?;
	let mut out = io::stdout().lock();

	let command = match action {
		Action::List => return action::list(&mut out, &enumerate::list(devices)).context("Failed to write device list"),
		Action::Device(command) => command,
	};

	let selected = enumerate::select(devices, cli.index)?;
	let session = Session::open(selected)?;
	debug!(model = session.model().name, "Session ready");

	action::describe(&mut out, session.manufacturer(), session.product())?;
	action::perform(&mut out, session.device(), command).await?;
	out.flush()?;

	Ok(())
}

mod trace {
	use std::io::{self, IsTerminal};

	use tracing::Subscriber;
	use tracing_subscriber::{
		EnvFilter, Layer, filter::LevelFilter, fmt::format::FmtSpan, layer::SubscriberExt, registry::LookupSpan,
		util::SubscriberInitExt,
	};

	fn env_filter() -> EnvFilter {
		let directive = LevelFilter::WARN.into();

		EnvFilter::builder().with_default_directive(directive).from_env_lossy()
	}

	fn new_fmt<S>() -> Box<dyn Layer<S> + Send + Sync>
	where
		S: Subscriber + for<'a> LookupSpan<'a> + Send + Sync,
	{
		tracing_subscriber::fmt::layer()
			.compact()
			.without_time()
			.with_target(false)
			.with_ansi(io::stderr().is_terminal())
			.with_span_events(FmtSpan::NONE)
			.with_writer(io::stderr)
			.with_filter(env_filter())
			.boxed()
	}

	pub(crate) fn setup() {
		tracing_subscriber::registry().with(new_fmt()).init();
	}
}

use clap::Parser;
use env_logger::Env;
use log::LevelFilter;
use msh::flags::Flags;
use msh::shell::Shell;

fn init_logging(debug: bool) {
    let default_filter = if debug {
        format!("warn,msh={}", LevelFilter::Debug.as_str())
    } else {
        LevelFilter::Warn.as_str().to_string()
    };
    let env = Env::default().default_filter_or(default_filter);
    let mut builder = env_logger::Builder::from_env(env);
    builder.format_timestamp(None);
    let _ = builder.try_init();
}

fn main() -> Result<(), msh::error::ShellError> {
    let flags = Flags::parse();
    init_logging(flags.debug);

    let mut shell = Shell::new(&flags)?;
    shell.run()
}

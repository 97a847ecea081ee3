mod app;

use std::process;

use app::App;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let Some(connection_name) = args.first() else {
        eprintln!("usage: spatial_browser <connection-name> [schema]");
        process::exit(2);
    };

    let mut app = App::new();
    if let Err(err) = app.run(connection_name, args.get(1).map(String::as_str)) {
        eprintln!("{err}");
        process::exit(1);
    }
}

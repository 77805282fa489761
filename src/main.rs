//! OpenWriter CLI: paginate an HTML document from disk

use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use log::error;
use openwriter::render::render_document;
use openwriter::PagedView;

#[derive(Parser)]
#[command(name = "openwriter")]
#[command(version)]
#[command(about = "Split an HTML document into fixed-size pages", long_about = None)]
struct Cli {
    /// Input HTML file
    #[arg(value_name = "FILE")]
    input: PathBuf,

    /// Print the rendered pages as JSON
    #[arg(long, conflicts_with = "html")]
    json: bool,

    /// Print the page containers as HTML
    #[arg(long)]
    html: bool,
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> openwriter::Result<()> {
    let html = fs::read_to_string(&cli.input)?;

    let mut view = PagedView::new();
    view.paginate_now(&html);

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&view.render())?);
    } else if cli.html {
        println!("{}", render_document(view.pagination(), view.constraints()));
    } else {
        let capacity = view.constraints().content_height();
        for page in view.render() {
            let used = view
                .pagination()
                .page(page.number)
                .map(|p| (p.len(), p.used_height()))
                .unwrap_or_default();
            println!(
                "{}: {} blocks, {:.1} of {:.1}px",
                page.footer, used.0, used.1, capacity
            );
        }
    }

    Ok(())
}

use clap::Parser;

mod args;
mod tichu;
use self::args::{Args, Ui};
use self::tichu::{cli_main, Controller, FileStore, MemoryStore, RecordStore};

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let store: Box<dyn RecordStore> = if args.ephemeral {
        Box::new(MemoryStore::default())
    } else {
        Box::new(FileStore::new(args.records))
    };
    let controller = Controller::new(store).with_target_score(args.target);
    match args.ui.unwrap_or_default() {
        Ui::Console => cli_main(controller, !args.no_color),
        #[cfg(feature = "tui")]
        Ui::Tui => tichu::tui_main(controller),
    }
}

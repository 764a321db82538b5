use picker_core::ColorItem;
use picker_engine::{Navigator, Notifier};
use picker_logging::picker_info;
use tokio::sync::watch;

/// How the screen was left.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Exit {
    Cancelled,
    Saved(ColorItem),
    Failed(String),
}

/// Navigator and notifier that print to stdout and report how the screen ended.
pub(crate) struct ConsoleShell {
    exit_tx: watch::Sender<Option<Exit>>,
}

impl ConsoleShell {
    pub fn new() -> (Self, watch::Receiver<Option<Exit>>) {
        let (exit_tx, exit_rx) = watch::channel(None);
        (Self { exit_tx }, exit_rx)
    }

    fn exit(&self, exit: Exit) {
        self.exit_tx.send_replace(Some(exit));
    }
}

impl Navigator for ConsoleShell {
    fn go_back(&self) {
        println!("<- back");
        self.exit(Exit::Cancelled);
    }

    fn go_back_with(&self, item: ColorItem) {
        println!("<- back with {item}");
        picker_info!("Screen closed with color id={}", item.id);
        self.exit(Exit::Saved(item));
    }
}

impl Notifier for ConsoleShell {
    fn notify(&self, message: &str) {
        println!("!! {message}");
        self.exit(Exit::Failed(message.to_string()));
    }
}

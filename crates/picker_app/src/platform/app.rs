use std::path::Path;
use std::sync::Arc;

use anyhow::{bail, Context};
use log::LevelFilter;
use picker_core::{EnglishStrings, Loadable};
use picker_engine::{ColorPickerViewModel, JsonFileStore, PickerDeps, StaticColorRepository};
use picker_logging::{picker_info, LogDestination};

use super::config::{load_config, AppConfig, CONFIG_FILENAME};
use super::console::{ConsoleShell, Exit};
use super::render::render;

/// Open the picker, optionally select the color named on the command line,
/// save, and print every view the screen publishes along the way.
pub fn run_app() -> anyhow::Result<()> {
    picker_logging::initialize(LogDestination::File, LevelFilter::Info);

    let config = load_config(Path::new(CONFIG_FILENAME));
    let wanted = std::env::args().nth(1);

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("building tokio runtime")?;
    runtime.block_on(run_screen(config, wanted))
}

async fn run_screen(config: AppConfig, wanted: Option<String>) -> anyhow::Result<()> {
    let store = JsonFileStore::open(&config.store_dir, JsonFileStore::DEFAULT_FILENAME)
        .with_context(|| format!("opening store in {:?}", config.store_dir))?;
    let repository =
        StaticColorRepository::new(config.colors()).with_step_delay(config.step_delay());
    let (shell, mut exit_rx) = ConsoleShell::new();
    let shell = Arc::new(shell);

    let deps = PickerDeps {
        repository: Arc::new(repository),
        navigator: shell.clone(),
        notifier: shell,
        strings: Arc::new(EnglishStrings),
        store: Arc::new(store),
    };
    let view_model = ColorPickerViewModel::open(deps, config.settings(), config.default_color_id);

    let mut views = view_model.subscribe();
    let printer = tokio::spawn(async move {
        loop {
            let lines = render(&views.borrow_and_update());
            for line in lines {
                println!("{line}");
            }
            if views.changed().await.is_err() {
                break;
            }
        }
    });

    let loaded = view_model
        .subscribe()
        .wait_for(|view| !view.content.is_loading())
        .await?
        .content
        .clone();
    let colors = match loaded {
        Loadable::Success(state) => state.colors_list,
        Loadable::Failure(failure) => bail!("loading colors failed: {}", failure.message),
        Loadable::Loading => bail!("screen closed before colors loaded"),
    };

    if let Some(name) = wanted {
        let Some(row) = colors
            .into_iter()
            .find(|row| row.item.name.eq_ignore_ascii_case(&name))
        else {
            view_model.cancel();
            view_model.close().await;
            let _ = printer.await;
            bail!("no color named {name:?}");
        };
        view_model.select(row.item);
    }

    view_model.save();
    let exit = exit_rx.wait_for(Option::is_some).await?.clone();

    view_model.close().await;
    let _ = printer.await;

    match exit {
        Some(Exit::Saved(item)) => {
            picker_info!("Demo finished; saved {}", item);
            Ok(())
        }
        Some(Exit::Failed(message)) => bail!("save failed: {message}"),
        Some(Exit::Cancelled) | None => Ok(()),
    }
}

// App module
// - mod.rs: App struct, construction, config reload
// - event_loop.rs: run() loop and background polling
// - rendering.rs: draw() and region registration
// - handlers.rs: key handling and action dispatch
// - mouse.rs: routing classified mouse actions to panes

mod event_loop;
mod handlers;
mod mouse;
mod preview_loader;
mod rendering;
pub mod terminal;

use std::path::{Path, PathBuf};
use std::time::Instant;

use ratatui::{backend::Backend, Terminal};

use crate::cli::Cli;
use crate::components::pane_layout::PaneAreas;
use crate::components::{
    ConfirmDialog, DeckData, DeckMouse, DeckRegion, FileList, PaneLayout, Preview, StatusBar,
};
use crate::config::{ConfigManager, ConfigWatcherMode, Theme};
use crate::epoch::Epoch;
use crate::error::{DeckError, Result};
use crate::input::focus::FocusManager;

use preview_loader::PreviewLoader;

/// Command-line settings that win over the config files, including after a
/// hot reload.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub double_click_ms: Option<u64>,
    pub theme: Option<Theme>,
}

impl Overrides {
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        let theme = match &cli.theme {
            Some(name) => Some(
                Theme::preset(name)
                    .ok_or_else(|| DeckError::Config(format!("Unknown theme: {}", name)))?,
            ),
            None => None,
        };
        Ok(Self {
            double_click_ms: cli.double_click_ms,
            theme,
        })
    }
}

pub struct App<B: Backend> {
    terminal: Terminal<B>,
    should_quit: bool,
    needs_redraw: bool,
    last_tick: Instant,
    config_manager: ConfigManager,
    config_watcher: Option<ConfigWatcherMode>,
    overrides: Overrides,
    mouse: DeckMouse,
    hover: Option<(DeckRegion, DeckData)>,
    focus: FocusManager,
    layout: PaneLayout,
    panes: PaneAreas,
    file_list: FileList,
    preview: Preview,
    dialog: ConfirmDialog,
    status: StatusBar,
    epoch: Epoch,
    loader: PreviewLoader,
}

impl<B: Backend> App<B> {
    pub fn new(
        terminal: Terminal<B>,
        mut config_manager: ConfigManager,
        root: PathBuf,
        overrides: Overrides,
    ) -> Result<Self> {
        Self::apply_overrides(&mut config_manager, &overrides);
        let config = config_manager.app_config().clone();

        let config_watcher = if config.general.watch_config {
            Some(ConfigWatcherMode::best_effort(
                config_manager.config_dir(),
                config.general.config_watch_debounce_ms,
            ))
        } else {
            None
        };

        let file_list = FileList::new(root)?;
        tracing::info!(root = %file_list.root().display(), "starting");

        Ok(Self {
            terminal,
            should_quit: false,
            needs_redraw: true,
            last_tick: Instant::now(),
            config_watcher,
            overrides,
            mouse: DeckMouse::new(config.mouse.clone()),
            hover: None,
            focus: FocusManager::new(),
            layout: PaneLayout::new(&config.layout),
            panes: PaneAreas::default(),
            file_list,
            preview: Preview::new(),
            dialog: ConfirmDialog::new("Quit ridge-deck?"),
            status: StatusBar::new(),
            epoch: Epoch::new(),
            loader: PreviewLoader::new(),
            config_manager,
        })
    }

    pub fn mark_dirty(&mut self) {
        self.needs_redraw = true;
    }

    pub fn config(&self) -> &ConfigManager {
        &self.config_manager
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn root(&self) -> &Path {
        self.file_list.root()
    }

    fn apply_overrides(config_manager: &mut ConfigManager, overrides: &Overrides) {
        if let Some(ms) = overrides.double_click_ms {
            config_manager.app_config_mut().mouse.double_click_ms = ms;
        }
        if let Some(theme) = &overrides.theme {
            config_manager.set_theme(theme.clone());
        }
    }

    pub(super) fn reload_config(&mut self, path: &Path) {
        self.config_manager.reload_file(path);
        Self::apply_overrides(&mut self.config_manager, &self.overrides);

        let config = self.config_manager.app_config();
        self.mouse.set_config(config.mouse.clone());
        self.layout.apply_config(&config.layout);
        tracing::info!(path = %path.display(), "config reloaded");
        self.status.set_last_action("config reloaded");
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use ratatui::backend::TestBackend;
    use std::fs;
    use tempfile::TempDir;

    pub struct Fixture {
        pub app: App<TestBackend>,
        pub root: TempDir,
        _config: TempDir,
    }

    /// An 80x24 app over a root holding `docs/`, `src/` and two files, drawn once.
    pub fn fixture() -> Fixture {
        let root = TempDir::new().unwrap();
        fs::create_dir(root.path().join("docs")).unwrap();
        fs::create_dir(root.path().join("src")).unwrap();
        fs::write(root.path().join("src").join("lib.rs"), "pub mod mouse;\n").unwrap();
        fs::write(root.path().join("a.txt"), "alpha\nbeta\n").unwrap();
        let long: String = (0..100).map(|i| format!("line {}\n", i)).collect();
        fs::write(root.path().join("b.txt"), long).unwrap();

        let config = TempDir::new().unwrap();
        fs::write(
            config.path().join("config.toml"),
            "[general]\nwatch_config = false\n",
        )
        .unwrap();

        let terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
        let mut app = App::new(
            terminal,
            ConfigManager::with_dir(config.path().to_path_buf()),
            root.path().to_path_buf(),
            Overrides::default(),
        )
        .unwrap();
        app.draw().unwrap();

        Fixture {
            app,
            root,
            _config: config,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::fixture;
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_overrides_survive_reload() {
        let mut fx = fixture();
        fx.app.overrides.double_click_ms = Some(150);
        let path = fx.app.config().config_dir().join("config.toml");
        std::fs::write(&path, "[mouse]\ndouble_click_ms = 900\n").unwrap();

        fx.app.reload_config(&path);
        assert_eq!(fx.app.mouse.config().double_click_ms, 150);
    }

    #[test]
    fn test_reload_pushes_mouse_config_to_handler() {
        let mut fx = fixture();
        let path = fx.app.config().config_dir().join("config.toml");
        std::fs::write(&path, "[mouse]\nscroll_delta = 7\n").unwrap();

        fx.app.reload_config(&path);
        assert_eq!(fx.app.mouse.config().scroll_delta, 7);
        assert_eq!(fx.app.status.last_action(), "config reloaded");
    }

    #[test]
    fn test_unknown_theme_is_rejected() {
        use clap::Parser;
        let cli = Cli::parse_from(["ridge-deck", "--theme", "nope"]);
        assert!(Overrides::from_cli(&cli).is_err());

        let cli = Cli::parse_from(["ridge-deck", "--theme", "vibrant", "--double-click-ms", "250"]);
        let overrides = Overrides::from_cli(&cli).unwrap();
        assert_eq!(overrides.double_click_ms, Some(250));
        assert_eq!(overrides.theme.map(|t| t.name), Some("vibrant".to_string()));
    }
}

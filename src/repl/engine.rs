use std::sync::Arc;

use reedline::{
    ColumnarMenu, Emacs, FileBackedHistory, KeyCode, KeyModifiers, MenuBuilder,
    Reedline, ReedlineEvent, ReedlineMenu, Signal, default_emacs_keybindings,
};
use tracing::{debug, warn};

use crate::config::{CompletionConfig, HistoryConfig};
use crate::connection::CatalogSource;
use crate::error::Result;

use super::completer::PgCompleter;
use super::hinter::HistoryHinter;
use super::meta::{Evaluation, evaluate};
use super::prompt::PgPrompt;
use super::shared_state::SharedState;
use super::validator::StatementValidator;

const COMPLETION_MENU: &str = "completion_menu";

/// REPL engine for interactive input
pub struct ReplEngine {
    /// Line editor for command input
    editor: Reedline,

    /// Shared state with the completer
    shared_state: SharedState,

    /// Whether to continue running
    running: bool,
}

impl ReplEngine {
    /// Create a new REPL engine with shared state
    ///
    /// # Arguments
    /// * `shared_state` - Shared state, also read by the completer
    /// * `history_config` - History configuration
    /// * `source` - Catalog used for completion queries
    /// * `completion_config` - Completion settings
    ///
    /// # Returns
    /// * `Result<Self>` - New REPL engine or error
    pub fn new(
        shared_state: SharedState,
        history_config: &HistoryConfig,
        source: Arc<dyn CatalogSource>,
        completion_config: CompletionConfig,
    ) -> Result<Self> {
        let mut keybindings = default_emacs_keybindings();
        keybindings.add_binding(
            KeyModifiers::NONE,
            KeyCode::Tab,
            ReedlineEvent::UntilFound(vec![
                ReedlineEvent::Menu(COMPLETION_MENU.to_string()),
                ReedlineEvent::MenuNext,
            ]),
        );
        keybindings.add_binding(
            KeyModifiers::SHIFT,
            KeyCode::BackTab,
            ReedlineEvent::MenuPrevious,
        );

        let history = if history_config.persist {
            match FileBackedHistory::with_file(
                history_config.max_size,
                history_config.file_path.clone(),
            ) {
                Ok(history) => history,
                Err(e) => {
                    warn!("history file {} unusable: {}", history_config.file_path.display(), e);
                    FileBackedHistory::new(history_config.max_size)?
                }
            }
        } else {
            FileBackedHistory::new(history_config.max_size)?
        };

        let completer = PgCompleter::new(source, shared_state.clone(), completion_config);
        let completion_menu = ColumnarMenu::default().with_name(COMPLETION_MENU);

        let editor = Reedline::create()
            .with_completer(Box::new(completer))
            .with_menu(ReedlineMenu::EngineCompleter(Box::new(completion_menu)))
            .with_edit_mode(Box::new(Emacs::new(keybindings)))
            .with_hinter(Box::new(HistoryHinter::new()))
            .with_validator(Box::new(StatementValidator::new()))
            .with_history(Box::new(history));

        Ok(Self {
            editor,
            shared_state,
            running: true,
        })
    }

    /// Read a single line of input
    ///
    /// # Returns
    /// * `Result<Option<String>>` - Input line, an empty line on Ctrl-C, None on EOF
    pub fn read_line(&mut self) -> Result<Option<String>> {
        let prompt = PgPrompt::new(
            self.shared_state.get_database(),
            self.shared_state.is_connected(),
        );
        match self.editor.read_line(&prompt)? {
            Signal::Success(line) => Ok(Some(line)),
            Signal::CtrlC => Ok(Some(String::new())),
            Signal::CtrlD => Ok(None),
        }
    }

    /// Evaluate one submitted line
    ///
    /// # Arguments
    /// * `input` - The submitted line
    ///
    /// # Returns
    /// * `Evaluation` - Output to print or a request to quit
    pub fn process_input(&mut self, input: &str) -> Evaluation {
        let evaluation = evaluate(&self.shared_state, input);
        if evaluation == Evaluation::Quit {
            self.running = false;
        }
        evaluation
    }

    /// Run the read-evaluate loop until `\q` or EOF
    pub fn run(&mut self) -> Result<()> {
        while self.is_running() {
            let Some(input) = self.read_line()? else {
                break;
            };

            match self.process_input(&input) {
                Evaluation::Empty => {}
                Evaluation::Output(text) if !text.is_empty() => println!("{}", text),
                Evaluation::Output(_) => {}
                Evaluation::Quit => debug!("quit requested"),
            }
        }

        if let Err(e) = self.editor.sync_history() {
            warn!("failed to write history: {}", e);
        }
        Ok(())
    }

    /// Shared state used by this engine
    pub fn shared_state(&self) -> &SharedState {
        &self.shared_state
    }

    /// Check if REPL is still running
    pub fn is_running(&self) -> bool {
        self.running
    }
}

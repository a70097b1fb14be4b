use std::io;
use std::rc::Rc;

use tokio::io::{AsyncBufReadExt, BufReader};

use workbench_host::extension::{ExtensionError, ExtensionsConfig};
use workbench_host::services::adapters::{
    default_configuration, ensure_settings_file, get_extensions_path, InMemoryConfigurationStore,
    JsonFileConfigurationStore, PathFilePicker, TokioLocalExecutor,
};
use workbench_host::services::ports::ConfigurationStore;
use workbench_host::services::MENU_FILE_OPEN;
use workbench_host::Workbench;

mod logging;
mod shell;

use shell::{ShellCommand, HELP};

fn main() -> io::Result<()> {
    let _logging_guard = logging::init();

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    let local = tokio::task::LocalSet::new();
    local.block_on(&runtime, run())
}

fn to_io(e: impl std::fmt::Display) -> io::Error {
    io::Error::new(io::ErrorKind::Other, e.to_string())
}

fn open_store() -> Rc<dyn ConfigurationStore> {
    match ensure_settings_file() {
        Ok(path) => {
            tracing::info!(path = %path.display(), "using settings file");
            Rc::new(JsonFileConfigurationStore::new(path))
        }
        Err(e) => {
            tracing::warn!(error = %e, "settings file unavailable, keeping configuration in memory");
            Rc::new(InMemoryConfigurationStore::with_value(default_configuration()))
        }
    }
}

async fn run() -> io::Result<()> {
    let extensions = match get_extensions_path() {
        Some(path) => ExtensionsConfig::load(&path).map_err(to_io)?,
        None => ExtensionsConfig::default(),
    };

    let picker = Rc::new(PathFilePicker::new());
    let executor = Rc::new(TokioLocalExecutor::new());
    let mut workbench = Workbench::new(open_store(), executor.clone()).map_err(to_io)?;
    workbench
        .register_builtin(picker.clone(), &extensions)
        .map_err(to_io)?;
    for failure in workbench.activate_all() {
        eprintln!("{}", failure);
    }
    executor.drain().await;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let command = match ShellCommand::parse(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(e) => {
                println!("error: {}", e);
                continue;
            }
        };
        if command == ShellCommand::Quit {
            break;
        }
        let result = execute(&workbench, &picker, command).await;
        // Background work started by the command (File > Open reads) lands
        // before its reply and before the next command runs.
        executor.drain().await;
        match result {
            Ok(output) => println!("{}", output),
            Err(e) => println!("error: {}", e),
        }
    }

    executor.drain().await;
    workbench.shutdown();
    Ok(())
}

async fn execute(
    workbench: &Workbench,
    picker: &PathFilePicker,
    command: ShellCommand,
) -> Result<String, ExtensionError> {
    let services = workbench.services();
    match command {
        ShellCommand::Help => return Ok(HELP.to_string()),
        ShellCommand::Quit => {}
        ShellCommand::State => {
            return Ok(serde_json::to_string_pretty(&workbench.snapshot())
                .unwrap_or_else(|e| format!("snapshot not serializable: {}", e)));
        }
        ShellCommand::Activity(id) => services.activity_bar.select(&id)?,
        ShellCommand::Sidebar(id) => services.sidebar.select(&id)?,
        ShellCommand::Menu(id) => services.menu_bar.select(&id)?,
        ShellCommand::Open(path) => {
            picker.queue(path);
            services.menu_bar.select(MENU_FILE_OPEN)?;
        }
        ShellCommand::Create {
            file_type,
            parent_id,
        } => services.folder_tree.create(file_type, parent_id.as_deref()),
        ShellCommand::Rename { id, name } => services.folder_tree.rename(&id, name)?,
        ShellCommand::SelectFile(id) => services.folder_tree.select_file(&id)?,
        ShellCommand::Search(query) => services.search.submit(&query),
        ShellCommand::Click(key) => services.search.click_result(&key)?,
        ShellCommand::Tab(id) => services.editor.select(&id)?,
        ShellCommand::Edit { id, value } => services.editor.update_content(&id, value)?,
        ShellCommand::Close(id) => services.editor.close(&id)?,
        ShellCommand::Config(value) => {
            services.settings.change_configuration(value).await;
        }
    }
    Ok("ok".to_string())
}

mod state;

use kontext_core::{
    Config, GeminiExtractor, PartsExtractor, PromptField, SessionError, SessionSnapshot,
};
use state::AppState;
use std::sync::Arc;
use tauri::{AppHandle, Emitter, State};

#[tauri::command]
fn get_session(state: State<'_, AppState>) -> Result<SessionSnapshot, String> {
    let session = state.session()?;
    Ok(session.snapshot())
}

#[tauri::command]
fn update_field(
    state: State<'_, AppState>,
    field: PromptField,
    value: String,
) -> Result<SessionSnapshot, String> {
    let mut session = state.session()?;
    session.set_field(field, value);
    Ok(session.snapshot())
}

#[tauri::command]
async fn run_assistant(
    app: AppHandle,
    state: State<'_, AppState>,
    input: String,
) -> Result<SessionSnapshot, String> {
    let (raw_input, started) = {
        let mut session = state.session()?;
        session.set_assist_input(input);
        match session.begin_assist() {
            Ok(raw_input) => (raw_input, session.snapshot()),
            // Validation errors are shown in the form, not raised to the caller.
            Err(SessionError::Validation(_)) => return Ok(session.snapshot()),
            Err(e) => return Err(e.to_string()),
        }
    };

    if let Err(e) = app.emit("assist_status", &started) {
        log::warn!("Failed to emit assist_status: {}", e);
    }

    let result = state.extractor().extract(&raw_input).await;

    let mut session = state.session()?;
    session.finish_assist(result);
    Ok(session.snapshot())
}

#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    let config = match Config::load() {
        Ok(config) => config,
        Err(e) => {
            log::error!("[SETUP] {}", e);
            std::process::exit(1);
        }
    };
    log::info!("[SETUP] Using {} via {}", config.model, config.base_url);

    let extractor = match GeminiExtractor::new(&config) {
        Ok(extractor) => extractor,
        Err(e) => {
            log::error!("[SETUP] {}", e);
            std::process::exit(1);
        }
    };

    tauri::Builder::default()
        .manage(AppState::new(Arc::new(extractor)))
        .invoke_handler(tauri::generate_handler![
            get_session,
            update_field,
            run_assistant
        ])
        .run(tauri::generate_context!())
        .expect("error while running tauri application");
}

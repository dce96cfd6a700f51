pub mod db;
pub mod floating;
pub mod generator;
pub mod history;
pub mod poetry;
pub mod settings;
mod utils;

#[cfg(feature = "desktop")]
pub(crate) use desktop::AppState;
#[cfg(feature = "desktop")]
pub use desktop::run;

#[cfg(feature = "desktop")]
mod desktop {
    use tauri::{Manager, State};

    use crate::{
        db::Database,
        generator::{
            commands::{
                clear_history, clear_history_selection, export_history_item, generate_poetry,
                get_generation_state, get_history, get_overview, regenerate_poetry,
                select_history_item,
            },
            GenerationController,
        },
        settings::{GenerationSettings, SettingsStore},
    };

    pub(crate) struct AppState {
        pub(crate) generator: GenerationController,
        pub(crate) settings: SettingsStore,
    }

    #[tauri::command]
    fn get_generation_settings(state: State<AppState>) -> Result<GenerationSettings, String> {
        Ok(state.settings.generation())
    }

    #[tauri::command]
    async fn set_generation_settings(
        settings: GenerationSettings,
        state: State<'_, AppState>,
    ) -> Result<(), String> {
        state
            .settings
            .update_generation(settings.clone())
            .map_err(|e| e.to_string())?;
        state
            .generator
            .update_settings(settings)
            .await
            .map_err(|e| e.to_string())
    }

    #[cfg_attr(mobile, tauri::mobile_entry_point)]
    pub fn run() {
        // Initialize logging (reads RUST_LOG env var)
        env_logger::Builder::from_default_env()
            .filter_level(log::LevelFilter::Info)
            .init();

        log::info!("Starry Verse starting up...");

        tauri::Builder::default()
            .plugin(tauri_plugin_opener::init())
            .setup(|app| {
                let result = (|| -> anyhow::Result<()> {
                    let app_data_dir = app
                        .path()
                        .app_data_dir()
                        .map_err(|err| anyhow::anyhow!(err))?;
                    std::fs::create_dir_all(&app_data_dir)?;

                    let settings_store = SettingsStore::new(app_data_dir.join("settings.json"))?;

                    let database = Database::new(app_data_dir.join("starry-verse.sqlite3"))?;
                    let generator =
                        GenerationController::new(Some(database), settings_store.generation());

                    let restored = tauri::async_runtime::block_on(generator.restore_history())?;
                    log::info!("Restored {restored} history records");

                    app.manage(AppState {
                        generator,
                        settings: settings_store,
                    });

                    Ok(())
                })();

                result.map_err(|err| err.into())
            })
            .invoke_handler(tauri::generate_handler![
                generate_poetry,
                regenerate_poetry,
                get_generation_state,
                get_history,
                clear_history,
                select_history_item,
                clear_history_selection,
                export_history_item,
                get_overview,
                get_generation_settings,
                set_generation_settings,
            ])
            .run(tauri::generate_context!())
            .expect("error while running tauri application");
    }
}

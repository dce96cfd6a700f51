use tauri::State;

use crate::{
    db::GenerationRecord,
    generator::{GenerationController, GenerationSnapshot, Overview},
    AppState,
};

fn controller_from_state(state: &State<'_, AppState>) -> GenerationController {
    state.generator.clone()
}

#[tauri::command]
pub async fn generate_poetry(
    state: State<'_, AppState>,
    input: String,
) -> Result<GenerationRecord, String> {
    let controller = controller_from_state(&state);
    controller.generate(&input).await.map_err(|e| e.to_string())
}

#[tauri::command]
pub async fn regenerate_poetry(
    state: State<'_, AppState>,
    record_id: String,
) -> Result<GenerationRecord, String> {
    let controller = controller_from_state(&state);
    controller
        .regenerate(&record_id)
        .await
        .map_err(|e| e.to_string())
}

#[tauri::command]
pub async fn get_generation_state(
    state: State<'_, AppState>,
) -> Result<GenerationSnapshot, String> {
    let controller = controller_from_state(&state);
    Ok(controller.snapshot().await)
}

#[tauri::command]
pub async fn get_history(state: State<'_, AppState>) -> Result<Vec<GenerationRecord>, String> {
    let controller = controller_from_state(&state);
    Ok(controller.history().await)
}

#[tauri::command]
pub async fn clear_history(state: State<'_, AppState>) -> Result<(), String> {
    let controller = controller_from_state(&state);
    controller.clear_history().await.map_err(|e| e.to_string())
}

#[tauri::command]
pub async fn select_history_item(
    state: State<'_, AppState>,
    record_id: String,
) -> Result<GenerationRecord, String> {
    let controller = controller_from_state(&state);
    controller
        .select(&record_id)
        .await
        .map_err(|e| e.to_string())
}

#[tauri::command]
pub async fn clear_history_selection(state: State<'_, AppState>) -> Result<(), String> {
    let controller = controller_from_state(&state);
    controller.clear_selection().await;
    Ok(())
}

#[tauri::command]
pub async fn export_history_item(
    state: State<'_, AppState>,
    record_id: String,
) -> Result<String, String> {
    let controller = controller_from_state(&state);
    controller
        .export(&record_id)
        .await
        .map_err(|e| e.to_string())
}

#[tauri::command]
pub async fn get_overview(state: State<'_, AppState>) -> Result<Overview, String> {
    let controller = controller_from_state(&state);
    Ok(controller.overview().await)
}

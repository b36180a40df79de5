mod downloader;
mod ytdlp;

use downloader::tools::get_tools_status;
use ytdlp::{
    download_media, get_default_output_dir, get_media_info, open_file, pick_output_dir,
    show_in_folder,
};

#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
    tauri::Builder::default()
        .plugin(tauri_plugin_opener::init())
        .plugin(tauri_plugin_dialog::init())
        .invoke_handler(tauri::generate_handler![
            get_media_info,
            download_media,
            get_tools_status,
            get_default_output_dir,
            pick_output_dir,
            open_file,
            show_in_folder,
        ])
        .run(tauri::generate_context!())
        .expect("error while running tauri application")
}

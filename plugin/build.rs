const COMMANDS: &[&str] = &[
    "call_method",
    "identify_language",
    "identify_languages",
    "get_metrics",
];

fn main() {
    tauri_plugin::Builder::new(COMMANDS).build();
}

pub fn mask_secret(value: &str, front: usize, back: usize) -> String {
    if value.is_empty() {
        return String::new();
    }
    if value.len() <= front + back {
        return "***".to_string();
    }
    format!("{}...{}", &value[..front], &value[value.len() - back..])
}

const UNSAFE: &[char] = &[
    '\'', '\\', '/', ':', '*', '?', '"', '<', '>', '|', '!', '@', '#', '$', '%', '^', '&', '{',
    '}', '`', '=', '~', ',', ' ', '[', ']',
];

/// File name safe to create on any common filesystem: every character in
/// the unsafe set becomes `_`.
pub fn safe_file_name(file_name: &str) -> String {
    safe_file_name_with(file_name, '_')
}

pub fn safe_file_name_with(file_name: &str, replacement: char) -> String {
    file_name
        .chars()
        .map(|c| if UNSAFE.contains(&c) { replacement } else { c })
        .collect()
}

/// Last segment of a client-supplied path, whichever separator it uses.
pub fn base_name(file_name: &str) -> &str {
    file_name
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(file_name)
}

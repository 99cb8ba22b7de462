// Benchmark helper functions - Rust's dead code analysis doesn't understand
// that these are used by benchmark files in the same directory
// See: https://users.rust-lang.org/t/cargo-rustc-benches-awarnings/110111/2
#[allow(dead_code)]
pub fn generate_script(events: usize) -> String {
    let base = "<Event>\r\n  <Title>The Treaty of Ghent\r\n  <Body>Envoys from both crowns arrive at dawn.\r\n    Terms are read aloud in the great hall.\r\n  <end Body>\r\n  <Option>Sign the treaty\r\n  <Option>Demand better terms\r\n<end Event>\r\n\r\n";
    base.repeat(events)
}

#[allow(dead_code)]
pub fn generate_replacements(script: &str) -> Vec<String> {
    script
        .split('\n')
        .enumerate()
        .map(|(i, _)| format!("translated line {i}"))
        .collect()
}

use super::*;

#[test]
fn test_highlight() {
    assert_eq!("hello".hl(), "\u{1b}[33mhello\u{1b}[39m");
    assert_eq!(String::from("hello").hl(), "\u{1b}[33mhello\u{1b}[39m");
    assert_eq!("hello".hlq(), "\u{1b}[33m\"hello\"\u{1b}[39m");
}

#[test]
fn test_suggestions_for_commands() {
    let commands = ["echo", "help", "exit"];

    let suggestions = Suggestions::new("ecko", commands);
    assert_eq!(suggestions.iter().collect::<Vec<_>>(), ["echo"]);

    let suggestions = Suggestions::new("zzz", commands);
    assert!(suggestions.is_empty());
}

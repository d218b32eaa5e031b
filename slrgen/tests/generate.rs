use slrgen::{generate, listing_path};
use std::fs;
use std::path::PathBuf;

fn scratch(name: &str) -> PathBuf {
    let _ = env_logger::builder().is_test(true).try_init();
    let dir = std::env::temp_dir().join(format!("slrgen-{}-{}", std::process::id(), name));
    fs::create_dir_all(&dir).unwrap();
    dir
}

fn grammar(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("grammars")
        .join(name)
}

#[test]
fn writes_table() {
    let dir = scratch("table");
    let out = dir.join("expr.md");
    generate(grammar("expr.g"), out.clone(), false).unwrap();

    let text = fs::read_to_string(&out).unwrap();
    let mut lines = text.lines();
    assert_eq!(lines.next(), Some("| State | + | * | ( | ) | id | $ | E | T | F |"));
    assert_eq!(lines.next(), Some("|---|---|---|---|---|---|---|---|---|---|"));
    assert_eq!(lines.count(), 12);
    assert!(!listing_path(&out).exists());
    fs::remove_dir_all(dir).unwrap();
}

#[test]
fn debug_writes_listing() {
    let dir = scratch("listing");
    let out = dir.join("srt.md");
    generate(grammar("srt.g"), out.clone(), true).unwrap();

    let lst = listing_path(&out);
    assert_eq!(lst, dir.join("srt.md.lst"));
    let text = fs::read_to_string(lst).unwrap();
    assert!(text.starts_with("PS,6\n"));
    assert!(text.contains("P,4,R -> ε\n"));
    assert!(text.contains("FOLLOW,R,{c, $, }\n"));
    fs::remove_dir_all(dir).unwrap();
}

#[test]
fn conflict_fails_but_keeps_listing() {
    let dir = scratch("conflict");
    let out = dir.join("else.md");
    let err = generate(grammar("dangling_else.g"), out.clone(), true).unwrap_err();

    assert!(format!("{err:#}").contains("not SLR(1)"));
    assert!(!out.exists());
    assert!(listing_path(&out).exists());
    fs::remove_dir_all(dir).unwrap();
}

#[test]
fn missing_grammar_file() {
    let dir = scratch("missing");
    let err = generate(dir.join("nope.g"), dir.join("nope.md"), false).unwrap_err();
    assert!(err.to_string().contains("can't read grammar"));
    fs::remove_dir_all(dir).unwrap();
}

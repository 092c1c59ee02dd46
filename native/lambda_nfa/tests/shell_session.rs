//! Scripted shell sessions.

use lambda_nfa::shell::{Shell, ShellConfig};
use std::io::Cursor;

fn quiet_shell() -> Shell {
    Shell::new(ShellConfig {
        prompt: String::new(),
        history_file: None,
        ..ShellConfig::default()
    })
}

fn session(shell: &mut Shell, script: &str) -> String {
    let mut out = Vec::new();
    shell.run(Cursor::new(script), &mut out).unwrap();
    String::from_utf8(out).unwrap()
}

#[test]
fn test_full_session() {
    let script = r#"GENERATE
CHECK "aclun"
CHECK "ab"
PREFIX "abx"
PREFIX "b"
INIT 3
ADD 1 2 a
ADD 2 3 b
ADD 1 3 ~
ADD 5 1 a
DISPLAY
CHECK ""
PREFIX "ab"
bogus

QUIT
CHECK "a"
"#;
    let expected = r#"In language.
Not in language.
"a"
No prefix in language.
Error! Transition couldn't be added
(1, 2) a
(1, 3) ~
(2, 3) b
In language.
"ab"
Error! Invalid command
Error! No input!
"#;
    let mut shell = quiet_shell();
    assert_eq!(session(&mut shell, script), expected);
    assert_eq!(shell.automaton().unwrap().num_states(), 3);
}

#[test]
fn test_generate_display() {
    let expected = "\
(1, 2) ~
(2, 2) ~
(2, 3) a
(2, 4) ~
(3, 4) b
(3, 4) ~
(4, 1) ~
(4, 5) a
(5, 6) c
(5, 6) ~
(5, 9) ~
(5, 10) ~
(6, 7) l
(7, 3) m
(7, 6) a
(7, 7) d
(7, 8) e
(7, 9) u
(8, 6) ~
(9, 7) r
(9, 10) n
(10, 7) ~
";
    let mut shell = quiet_shell();
    assert_eq!(session(&mut shell, "g\nd\n"), expected);
}

#[test]
fn test_prompt_before_every_line() {
    let mut shell = Shell::new(ShellConfig {
        prompt: "nfa> ".to_string(),
        history_file: None,
        ..ShellConfig::default()
    });
    let output = session(&mut shell, "INIT 1\nCHECK \"\"\n");
    assert_eq!(output, "nfa> nfa> In language.\nnfa> ");
}

#[test]
fn test_reinit_replaces_automaton() {
    let mut shell = quiet_shell();
    let output = session(
        &mut shell,
        "INIT 2\nADD 1 2 a\nINIT 2\nCHECK \"a\"\nDISPLAY\n",
    );
    assert_eq!(output, "Not in language.\n\n");
}

use std::io::Write;
use std::process::{Command, Output};
use tempfile::NamedTempFile;

fn program(text: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("failed to create temp file");
    file.write_all(text.as_bytes()).expect("failed to write temp file");
    file
}

fn interpreter(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_interpreter"))
        .args(args)
        .output()
        .expect("failed to run interpreter")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

#[cfg(test)]
mod cli_tests {
    use super::*;

    const VOLUME: &str = "PARAM width, height, depth;\n\
                          VAR volume;\n\
                          CONST density = 2400;\n\
                          BEGIN\n\
                          \tvolume := width * height * depth;\n\
                          \tRETURN density * volume\n\
                          END.\n";

    #[test]
    fn test_runs_program_with_parameters() {
        let file = program(VOLUME);
        let path = file.path().to_str().expect("non-utf8 temp path");
        let output = interpreter(&[path, "1", "2", "3"]);
        assert!(output.status.success(), "{}", stderr(&output));
        assert_eq!(stdout(&output), "14400\n");
    }

    #[test]
    fn test_negative_parameters() {
        let file = program("PARAM a, b; BEGIN RETURN a - b END.");
        let path = file.path().to_str().expect("non-utf8 temp path");
        let output = interpreter(&[path, "-4", "-10"]);
        assert!(output.status.success(), "{}", stderr(&output));
        assert_eq!(stdout(&output), "6\n");
    }

    #[test]
    fn test_compile_error_is_rendered_with_caret() {
        let file = program("CONST limit = 1;\nBEGIN limit := 2; RETURN limit END.");
        let path = file.path().to_str().expect("non-utf8 temp path");
        let output = interpreter(&[path]);
        assert!(!output.status.success());
        assert_eq!(stdout(&output), "");
        assert_eq!(
            stderr(&output),
            "1:6: error: cannot assign to constant \"limit\"\n\
             \tBEGIN limit := 2; RETURN limit END.\n\
             \t      ^~~~~\n"
        );
    }

    #[test]
    fn test_runtime_error() {
        let file = program("PARAM a; BEGIN RETURN 1 / a END.");
        let path = file.path().to_str().expect("non-utf8 temp path");
        let output = interpreter(&[path, "0"]);
        assert!(!output.status.success());
        assert_eq!(stderr(&output), "error: division by zero\n");
    }

    #[test]
    fn test_wrong_parameter_count() {
        let file = program("PARAM a; BEGIN RETURN a END.");
        let path = file.path().to_str().expect("non-utf8 temp path");
        let output = interpreter(&[path]);
        assert!(!output.status.success());
        assert!(stderr(&output).contains("expects 1 parameter(s) but 0 were supplied"));
    }

    #[test]
    fn test_token_dump() {
        let file = program("BEGIN RETURN 7 END.");
        let path = file.path().to_str().expect("non-utf8 temp path");
        let output = interpreter(&[path, "--tokens"]);
        assert!(output.status.success(), "{}", stderr(&output));
        assert_eq!(stdout(&output).lines().count(), 5);
    }

    #[test]
    fn test_graph_dumps() {
        let file = program("BEGIN RETURN 2 * 3 END.");
        let path = file.path().to_str().expect("non-utf8 temp path");

        let tree = interpreter(&[path, "--dump-parse-tree"]);
        assert!(tree.status.success(), "{}", stderr(&tree));
        assert!(stdout(&tree).starts_with("digraph {\n"));
        assert!(stdout(&tree).contains("label=\"function-definition\""));

        let ast = interpreter(&[path, "--dump-ast"]);
        assert!(ast.status.success(), "{}", stderr(&ast));
        assert!(stdout(&ast).contains("label=\"6\""));

        let plain = interpreter(&[path, "--dump-ast", "--no-optimize"]);
        assert!(stdout(&plain).contains("label=\"*\""));
    }

    #[test]
    fn test_bad_invocations() {
        let missing = interpreter(&["/nonexistent/program.pl0"]);
        assert!(!missing.status.success());
        assert!(stderr(&missing).starts_with("error: failed to read"));

        let no_file = interpreter(&[]);
        assert!(!no_file.status.success());
        assert!(stderr(&no_file).contains("usage:"));
    }
}

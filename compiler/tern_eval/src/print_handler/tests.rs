use super::*;
use pretty_assertions::assert_eq;

#[test]
fn buffer_handler_println_appends_newline() {
    let handler = BufferPrintHandler::new();
    handler.println("hello");
    handler.println("world");
    assert_eq!(handler.get_output(), "hello\nworld\n");
}

#[test]
fn buffer_handler_clear_empties_buffer() {
    let handler = buffer_handler();
    handler.println("hello");
    handler.clear();
    assert_eq!(handler.get_output(), "");
}

#[test]
fn silent_handler_discards_output() {
    let handler = silent_handler();
    handler.println("hello");
    assert_eq!(handler.get_output(), "");
}

#[test]
fn stdout_handler_captures_nothing() {
    let handler = stdout_handler();
    handler.clear();
    assert_eq!(handler.get_output(), "");
}

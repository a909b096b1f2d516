use std::io::{self, BufRead, Write};
use std::sync::mpsc::{self, RecvTimeoutError};
use std::thread;

use facts_core::Msg;
use facts_logging::{facts_debug, facts_trace};

use super::ui::constants::{DOCUMENTS_PROMPT, QUESTION_PROMPT, QUIT_COMMAND, TICK_INTERVAL};

/// The messages a filled-in form produces when the user submits it.
pub fn submission_msgs(question: String, documents: String) -> [Msg; 3] {
    [
        Msg::QuestionChanged(question),
        Msg::DocumentsChanged(documents),
        Msg::SubmitClicked,
    ]
}

/// Prompts for question/documents pairs on stdin until EOF or `:quit`.
///
/// After each submission the next prompt waits for a signal on `ready_rx`,
/// sent by the app once the cycle has settled, so prompts never interleave
/// with results. `:quit` tears the active cycle down, also while waiting.
/// EOF only drops the sender, letting the app wait for an in-flight cycle
/// before exiting.
pub fn spawn_prompt_reader(msg_tx: mpsc::Sender<Msg>, ready_rx: mpsc::Receiver<()>) {
    let lines = spawn_line_reader();
    thread::spawn(move || {
        prompt_loop(&lines, &msg_tx, &ready_rx);
        facts_debug!("Prompt reader finished");
    });
}

fn spawn_line_reader() -> mpsc::Receiver<String> {
    let (line_tx, line_rx) = mpsc::channel();
    thread::spawn(move || {
        for line in io::stdin().lock().lines() {
            let Ok(line) = line else {
                break;
            };
            if line_tx.send(line).is_err() {
                break;
            }
        }
    });
    line_rx
}

fn prompt_loop(
    lines: &mpsc::Receiver<String>,
    msg_tx: &mpsc::Sender<Msg>,
    ready_rx: &mpsc::Receiver<()>,
) {
    loop {
        let Some(question) = prompt(lines, QUESTION_PROMPT) else {
            return;
        };
        if question.trim() == QUIT_COMMAND {
            let _ = msg_tx.send(Msg::TeardownRequested);
            return;
        }
        let Some(documents) = prompt(lines, DOCUMENTS_PROMPT) else {
            return;
        };
        if documents.trim() == QUIT_COMMAND {
            let _ = msg_tx.send(Msg::TeardownRequested);
            return;
        }
        for msg in submission_msgs(question, documents) {
            if msg_tx.send(msg).is_err() {
                return;
            }
        }
        if !wait_until_settled(lines, msg_tx, ready_rx) {
            return;
        }
    }
}

/// Blocks until the app reports the cycle settled. Returns `false` when the
/// reader should stop: the app went away, stdin closed or `:quit` was typed.
fn wait_until_settled(
    lines: &mpsc::Receiver<String>,
    msg_tx: &mpsc::Sender<Msg>,
    ready_rx: &mpsc::Receiver<()>,
) -> bool {
    let mut stdin_open = true;
    loop {
        match ready_rx.recv_timeout(TICK_INTERVAL) {
            Ok(()) => return stdin_open,
            Err(RecvTimeoutError::Disconnected) => return false,
            Err(RecvTimeoutError::Timeout) => {}
        }
        if !stdin_open {
            continue;
        }
        match lines.try_recv() {
            Ok(line) if line.trim() == QUIT_COMMAND => {
                let _ = msg_tx.send(Msg::TeardownRequested);
                return false;
            }
            Ok(line) => facts_trace!("Ignoring input while busy: {:?}", line),
            Err(mpsc::TryRecvError::Empty) => {}
            Err(mpsc::TryRecvError::Disconnected) => {
                // Keep the app's inbox open until the cycle settles so the
                // result still gets rendered.
                stdin_open = false;
            }
        }
    }
}

fn prompt(lines: &mpsc::Receiver<String>, label: &str) -> Option<String> {
    print!("{label}");
    let _ = io::stdout().flush();
    lines.recv().ok()
}

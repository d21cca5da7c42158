//! Menu-driven console session over any line reader and writer.

use std::io::{self, BufRead, Write};

use social_graph_core::{GraphError, SocialGraph};
use tracing::debug;

use crate::render::{self, OutputFormat};

const MENU: &str = "\n--- Social Network Console ---\n\
1. Add User\n\
2. Add Friendship\n\
3. View Network\n\
4. Shortest Connection Path\n\
5. Mutual Friends\n\
6. Suggested Friends\n\
7. Remove User\n\
8. Remove Friendship\n\
9. Exit";

/// Result of handling one menu choice.
#[derive(Debug, PartialEq, Eq)]
pub enum CommandResult {
    Continue,
    Quit,
}

/// One interactive session: owns the graph for its whole lifetime.
pub struct Session<R, W> {
    graph: SocialGraph,
    input: R,
    output: W,
    format: OutputFormat,
}

impl<R: BufRead, W: Write> Session<R, W> {
    pub fn new(graph: SocialGraph, input: R, output: W, format: OutputFormat) -> Self {
        Self {
            graph,
            input,
            output,
            format,
        }
    }

    pub fn graph(&self) -> &SocialGraph {
        &self.graph
    }

    /// Run until choice 9 or end of input.
    pub fn run(&mut self) -> io::Result<()> {
        loop {
            writeln!(self.output, "{MENU}")?;
            let Some(choice) = self.prompt("Enter choice: ")? else {
                break;
            };
            if self.handle_choice(&choice)? == CommandResult::Quit {
                break;
            }
        }
        Ok(())
    }

    /// Dispatch a single menu choice, prompting for its arguments.
    pub fn handle_choice(&mut self, choice: &str) -> io::Result<CommandResult> {
        debug!(choice, "menu choice");
        match choice {
            "1" => self.cmd_add_user(),
            "2" => self.cmd_add_friendship(),
            "3" => self.cmd_view_network(),
            "4" => self.cmd_shortest_path(),
            "5" => self.cmd_mutual_friends(),
            "6" => self.cmd_suggested_friends(),
            "7" => self.cmd_remove_user(),
            "8" => self.cmd_remove_friendship(),
            "9" => {
                self.say("Exiting program.")?;
                Ok(CommandResult::Quit)
            }
            _ => {
                self.say("Invalid choice. Try again.")?;
                Ok(CommandResult::Continue)
            }
        }
    }

    fn cmd_add_user(&mut self) -> io::Result<CommandResult> {
        let Some(user) = self.prompt("Enter user name: ")? else {
            return Ok(CommandResult::Quit);
        };
        match self.graph.add_user(user.as_str()) {
            Ok(()) => self.say(&format!("User '{user}' added."))?,
            Err(e) => self.report(&e)?,
        }
        Ok(CommandResult::Continue)
    }

    fn cmd_add_friendship(&mut self) -> io::Result<CommandResult> {
        let Some((a, b)) = self.prompt_pair("First user: ", "Second user: ")? else {
            return Ok(CommandResult::Quit);
        };
        let range = self.graph.weight_range();
        let label = format!("Interaction strength ({}-{}): ", range.min(), range.max());
        let Some(raw) = self.prompt(&label)? else {
            return Ok(CommandResult::Quit);
        };

        let Ok(raw) = raw.parse::<i64>() else {
            self.say("Invalid input. Please enter a number.")?;
            return Ok(CommandResult::Continue);
        };
        if self.graph.is_empty() {
            self.say("Network is empty. Add users first.")?;
            return Ok(CommandResult::Continue);
        }

        match self.graph.add_friendship_raw(&a, &b, raw) {
            Ok(weight) => self.say(&format!(
                "Friendship added between {a} and {b} with weight {weight}."
            ))?,
            Err(e) => self.report(&e)?,
        }
        Ok(CommandResult::Continue)
    }

    fn cmd_view_network(&mut self) -> io::Result<CommandResult> {
        let text = render::network(&self.graph.view_network(), self.format);
        self.say(&text)?;
        Ok(CommandResult::Continue)
    }

    fn cmd_shortest_path(&mut self) -> io::Result<CommandResult> {
        let Some((start, end)) = self.prompt_pair("Start user: ", "End user: ")? else {
            return Ok(CommandResult::Quit);
        };
        match self.graph.shortest_path(&start, &end) {
            Ok(found) => {
                let text = render::path(&found, self.format);
                self.say(&text)?;
            }
            Err(GraphError::NoPath { .. }) => self.say("No connection found.")?,
            Err(e) => self.report(&e)?,
        }
        Ok(CommandResult::Continue)
    }

    fn cmd_mutual_friends(&mut self) -> io::Result<CommandResult> {
        let Some((a, b)) = self.prompt_pair("User 1: ", "User 2: ")? else {
            return Ok(CommandResult::Quit);
        };
        match self.graph.mutual_friends(&a, &b) {
            Ok(mutual) => {
                let text = render::mutual(&a, &b, &mutual, self.format);
                self.say(&text)?;
            }
            Err(e) => self.report(&e)?,
        }
        Ok(CommandResult::Continue)
    }

    fn cmd_suggested_friends(&mut self) -> io::Result<CommandResult> {
        let Some(user) = self.prompt("Enter user: ")? else {
            return Ok(CommandResult::Quit);
        };
        match self.graph.suggestion_ranking(&user) {
            Ok(ranked) => {
                let text = render::suggestions(&user, &ranked, self.format);
                self.say(&text)?;
            }
            Err(e) => self.report(&e)?,
        }
        Ok(CommandResult::Continue)
    }

    fn cmd_remove_user(&mut self) -> io::Result<CommandResult> {
        let Some(user) = self.prompt("Enter user: ")? else {
            return Ok(CommandResult::Quit);
        };
        match self.graph.remove_user(&user) {
            Ok(()) => self.say(&format!(
                "User '{user}' and all related friendships removed."
            ))?,
            Err(e) => self.report(&e)?,
        }
        Ok(CommandResult::Continue)
    }

    fn cmd_remove_friendship(&mut self) -> io::Result<CommandResult> {
        let Some((a, b)) = self.prompt_pair("User 1: ", "User 2: ")? else {
            return Ok(CommandResult::Quit);
        };
        match self.graph.remove_friendship(&a, &b) {
            Ok(()) => self.say(&format!("Friendship between {a} and {b} removed."))?,
            Err(e) => self.report(&e)?,
        }
        Ok(CommandResult::Continue)
    }

    /// Print `label`, read one trimmed line. None at end of input.
    fn prompt(&mut self, label: &str) -> io::Result<Option<String>> {
        write!(self.output, "{label}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    fn prompt_pair(&mut self, first: &str, second: &str) -> io::Result<Option<(String, String)>> {
        let Some(a) = self.prompt(first)? else {
            return Ok(None);
        };
        Ok(self.prompt(second)?.map(|b| (a, b)))
    }

    fn say(&mut self, text: &str) -> io::Result<()> {
        writeln!(self.output, "{text}")
    }

    fn report(&mut self, err: &GraphError) -> io::Result<()> {
        debug!(error = %err, "operation rejected");
        writeln!(self.output, "Error: {err}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    /// Run a whole scripted session and return (stdout text, final graph).
    fn run_script(lines: &[&str]) -> (String, SocialGraph) {
        run_script_as(lines, OutputFormat::Text)
    }

    fn run_script_as(lines: &[&str], format: OutputFormat) -> (String, SocialGraph) {
        let input = Cursor::new(lines.join("\n"));
        let mut out = Vec::new();
        let mut session = Session::new(SocialGraph::new(), input, &mut out, format);
        session.run().unwrap();
        let graph = session.graph().clone();
        drop(session);
        (String::from_utf8(out).unwrap(), graph)
    }

    #[test]
    fn test_add_users_and_friendship() {
        let (out, g) = run_script(&[
            "1", "alice", "1", "bob", "2", "alice", "bob", "3", "9",
        ]);
        assert!(out.contains("User 'alice' added."));
        assert!(out.contains("Friendship added between alice and bob with weight 3."));
        assert!(out.contains("Exiting program."));
        assert_eq!(g.weight_between("bob", "alice"), Some(3));
    }

    #[test]
    fn test_inputs_are_trimmed() {
        let (out, g) = run_script(&[" 1 ", "  alice  ", "9"]);
        assert!(out.contains("User 'alice' added."));
        assert!(g.contains_user("alice"));
    }

    #[test]
    fn test_duplicate_user_reported() {
        let (out, g) = run_script(&["1", "alice", "1", "alice", "9"]);
        assert!(out.contains("Error: user 'alice' already exists"));
        assert_eq!(g.user_count(), 1);
    }

    #[test]
    fn test_non_numeric_weight() {
        let (out, g) = run_script(&["1", "a", "1", "b", "2", "a", "b", "strong", "9"]);
        assert!(out.contains("Invalid input. Please enter a number."));
        assert_eq!(g.edge_count(), 0);
    }

    #[test]
    fn test_weight_out_of_range() {
        let (out, g) = run_script(&[
            "1", "a", "1", "b", "2", "a", "b", "9", "2", "a", "b", "-2", "9",
        ]);
        assert!(out.contains("interaction weight 9 is outside the accepted range 1..=5"));
        assert!(out.contains("interaction weight -2 is outside the accepted range 1..=5"));
        assert_eq!(g.edge_count(), 0);
    }

    #[test]
    fn test_negative_weight_missing_user_reports_not_found() {
        let (out, _) = run_script(&["1", "a", "2", "a", "ghost", "-2", "9"]);
        assert!(out.contains("Error: user 'ghost' not found"));
    }

    #[test]
    fn test_negative_weight_self_friendship_reports_invalid_edge() {
        let (out, g) = run_script(&["1", "a", "2", "a", "a", "-1", "9"]);
        assert!(out.contains("Error: user 'a' cannot be friends with themselves"));
        assert!(!out.contains("interaction weight -1"));
        assert_eq!(g.edge_count(), 0);
    }

    #[test]
    fn test_negative_weight_duplicate_reports_edge_exists() {
        let (out, g) = run_script(&[
            "1", "a", "1", "b", "2", "a", "b", "2", "2", "b", "a", "-1", "9",
        ]);
        assert!(out.contains("Error: friendship between 'b' and 'a' already exists"));
        assert!(!out.contains("interaction weight -1"));
        assert_eq!(g.weight_between("a", "b"), Some(2));
    }

    #[test]
    fn test_friendship_on_empty_network() {
        let (out, _) = run_script(&["2", "a", "b", "1", "9"]);
        assert!(out.contains("Network is empty. Add users first."));
    }

    #[test]
    fn test_self_friendship_rejected() {
        let (out, g) = run_script(&["1", "a", "2", "a", "a", "1", "9"]);
        assert!(out.contains("cannot be friends with themselves"));
        assert_eq!(g.edge_count(), 0);
    }

    #[test]
    fn test_shortest_path_and_no_path() {
        let (out, _) = run_script(&[
            "1", "A", "1", "B", "1", "C", "1", "X",
            "2", "A", "B", "2",
            "2", "B", "C", "3",
            "4", "A", "C",
            "4", "A", "X",
            "9",
        ]);
        assert!(out.contains("Shortest path: A -> B -> C\nTotal interaction cost: 5"));
        assert!(out.contains("No connection found."));
    }

    #[test]
    fn test_mutual_and_suggested() {
        let (out, _) = run_script(&[
            "1", "A", "1", "B", "1", "C", "1", "D",
            "2", "A", "B", "1",
            "2", "A", "C", "1",
            "2", "B", "D", "1",
            "2", "C", "D", "1",
            "5", "A", "D",
            "6", "A",
            "6", "ghost",
            "9",
        ]);
        assert!(out.contains("Mutual friends between A and D: B, C"));
        assert!(out.contains("Suggested friends for A: D"));
        assert!(out.contains("Error: user 'ghost' not found"));
    }

    #[test]
    fn test_remove_user_and_friendship() {
        let (out, g) = run_script(&[
            "1", "a", "1", "b", "1", "c",
            "2", "a", "b", "1",
            "2", "b", "c", "1",
            "8", "a", "c",
            "7", "b",
            "7", "b",
            "9",
        ]);
        assert!(out.contains("Friendship between a and c removed."));
        assert!(out.contains("User 'b' and all related friendships removed."));
        assert!(out.contains("Error: user 'b' not found"));
        assert_eq!(g.user_count(), 2);
        assert_eq!(g.edge_count(), 0);
    }

    #[test]
    fn test_invalid_choice_continues() {
        let (out, _) = run_script(&["42", "3", "9"]);
        assert!(out.contains("Invalid choice. Try again."));
        assert!(out.contains("Network is empty."));
    }

    #[test]
    fn test_eof_ends_session() {
        let (out, g) = run_script(&["1", "alice"]);
        assert!(out.contains("User 'alice' added."));
        assert!(!out.contains("Exiting program."));
        assert!(g.contains_user("alice"));
    }

    #[test]
    fn test_eof_mid_command() {
        let (_, g) = run_script(&["1", "a", "2", "a"]);
        assert_eq!(g.user_count(), 1);
    }

    #[test]
    fn test_json_path_output() {
        let (out, _) = run_script_as(
            &["1", "A", "1", "B", "2", "A", "B", "4", "4", "A", "B", "9"],
            OutputFormat::Json,
        );
        assert!(out.contains("\"cost\": 4"));
        assert!(out.contains("\"path\": ["));
    }
}

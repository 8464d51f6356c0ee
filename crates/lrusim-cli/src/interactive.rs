//! Menu-driven interactive session

use std::io::{BufRead, Write};

use anyhow::Result;
use lrusim::CacheEngine;
use tracing::debug;

use crate::parser::{parse_address, parse_data};
use crate::render;

/// Interactive session over an arbitrary input/output pair
pub struct Session<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Session<R, W> {
    /// Create a session reading commands from `input`
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Run until the user exits or input ends
    ///
    /// # Arguments
    /// * `capacity` - Cache capacity; prompted for when `None`
    ///
    /// # Returns
    /// * `Result<Option<CacheEngine>>` - Final engine, or `None` if input ended
    ///   before a valid capacity was entered
    pub fn run(&mut self, capacity: Option<usize>) -> Result<Option<CacheEngine>> {
        writeln!(self.output)?;
        writeln!(self.output, "***** Interactive LRU Cache Simulator *****")?;

        let mut engine = match capacity {
            Some(capacity) => CacheEngine::new(capacity)?,
            None => match self.prompt_engine()? {
                Some(engine) => engine,
                None => return Ok(None),
            },
        };
        render::initialized(&mut self.output, &engine)?;

        loop {
            self.menu()?;
            let Some(choice) = self.read_line()? else {
                break;
            };

            match choice.trim() {
                "1" => {
                    if !self.access(&mut engine)? {
                        break;
                    }
                }
                "2" => render::cache_state(&mut self.output, &engine)?,
                "3" => render::statistics(&mut self.output, &engine.statistics())?,
                "4" => {
                    engine.reset();
                    writeln!(self.output, "Cache reset complete.")?;
                    writeln!(self.output)?;
                }
                "5" => {
                    writeln!(self.output)?;
                    writeln!(self.output, "Exiting simulator...")?;
                    break;
                }
                other => {
                    debug!(choice = other, "invalid menu choice");
                    writeln!(self.output, "Invalid choice. Try again.")?;
                }
            }
        }

        Ok(Some(engine))
    }

    fn prompt_engine(&mut self) -> Result<Option<CacheEngine>> {
        loop {
            write!(self.output, "Enter cache size (number of blocks): ")?;
            self.output.flush()?;

            let Some(line) = self.read_line()? else {
                return Ok(None);
            };

            match line.trim().parse::<usize>() {
                Ok(capacity) => match CacheEngine::new(capacity) {
                    Ok(engine) => return Ok(Some(engine)),
                    Err(err) => writeln!(self.output, "{}", err)?,
                },
                Err(_) => writeln!(self.output, "Invalid cache size: '{}'", line.trim())?,
            }
        }
    }

    fn menu(&mut self) -> Result<()> {
        writeln!(self.output)?;
        writeln!(self.output, "Options:")?;
        writeln!(self.output, "1. Access memory address")?;
        writeln!(self.output, "2. Display cache state")?;
        writeln!(self.output, "3. Display statistics")?;
        writeln!(self.output, "4. Reset cache")?;
        writeln!(self.output, "5. Exit")?;
        write!(self.output, "Enter choice: ")?;
        self.output.flush()?;
        Ok(())
    }

    /// Returns `false` when input ended mid-command
    fn access(&mut self, engine: &mut CacheEngine) -> Result<bool> {
        write!(self.output, "Enter address (decimal or 0x for hex): ")?;
        self.output.flush()?;
        let Some(line) = self.read_line()? else {
            return Ok(false);
        };
        let address = match parse_address(&line) {
            Ok(address) => address,
            Err(err) => {
                writeln!(self.output, "Invalid address: {}", err)?;
                return Ok(true);
            }
        };

        write!(self.output, "Enter data value (blank or 'auto' to derive): ")?;
        self.output.flush()?;
        let Some(line) = self.read_line()? else {
            return Ok(false);
        };
        let data = match parse_data(&line) {
            Ok(data) => data,
            Err(err) => {
                writeln!(self.output, "Invalid data value: {}", err)?;
                return Ok(true);
            }
        };

        let event = engine.access(address, data);
        render::event(&mut self.output, &event)?;
        Ok(true)
    }

    fn read_line(&mut self) -> Result<Option<String>> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(script: &str, capacity: Option<usize>) -> (Option<CacheEngine>, String) {
        let mut out = Vec::new();
        let engine = Session::new(script.as_bytes(), &mut out).run(capacity).unwrap();
        (engine, String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_access_and_exit() {
        let script = "2\n1\n0x1000\n100\n1\n0x1000\n\n5\n";

        let (engine, text) = session(script, None);
        let engine = engine.unwrap();

        assert_eq!(engine.capacity(), 2);
        assert!(text.contains("MISS | Address: 0x1000 | Loaded: 100"));
        assert!(text.contains("HIT  | Address: 0x1000 | Data: 100"));
        assert!(text.contains("Exiting simulator..."));
        assert_eq!(engine.statistics().hits, 1);
    }

    #[test]
    fn test_capacity_reprompt() {
        let script = "zero\n0\n3\n5\n";

        let (engine, text) = session(script, None);

        assert_eq!(engine.unwrap().capacity(), 3);
        assert!(text.contains("Invalid cache size: 'zero'"));
        assert!(text.contains("Invalid configuration"));
    }

    #[test]
    fn test_auto_data_and_display() {
        let script = "1\n16\nauto\n2\n3\n5\n";

        let (engine, text) = session(script, Some(4));

        assert_eq!(engine.unwrap().peek(16), Some(160));
        assert!(text.contains("Block 0: Addr=0x0010, Data=160"));
        assert!(text.contains("Hit Rate:        0.00%"));
    }

    #[test]
    fn test_reset() {
        let script = "1\n0x10\n1\n4\n2\n5\n";

        let (engine, text) = session(script, Some(2));
        let engine = engine.unwrap();

        assert!(engine.is_empty());
        assert_eq!(engine.statistics().total_accesses, 0);
        assert!(text.contains("Cache reset complete."));
        assert!(text.contains("Cache is empty."));
    }

    #[test]
    fn test_invalid_input_recovers() {
        let script = "9\n1\nnope\n1\n0x20\nxyz\n1\n0x20\n7\n5\n";

        let (engine, text) = session(script, Some(2));
        let engine = engine.unwrap();

        assert!(text.contains("Invalid choice. Try again."));
        assert!(text.contains("Invalid address: cannot parse 'nope'"));
        assert!(text.contains("Invalid data value: cannot parse 'xyz'"));
        assert_eq!(engine.peek(0x20), Some(7));
        assert_eq!(engine.statistics().total_accesses, 1);
    }

    #[test]
    fn test_eof_ends_session() {
        let (engine, _) = session("", None);
        assert!(engine.is_none());

        let (engine, _) = session("1\n0x10\n", Some(2));
        assert!(engine.unwrap().is_empty());
    }
}

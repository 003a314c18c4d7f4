// Copyright (c) 2020 White Leaf
//
// This software is released under the MIT License.
// https://opensource.org/licenses/MIT

use crate::import::ImportStats;
use config::Table;
use prettytable::{cell, format::consts::FORMAT_NO_LINESEP, row, Table as PrettyTable};

#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Imported(ImportStats),
    Failed(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Phase {
    pub table: Table,
    pub file: String,
    pub outcome: Outcome,
}

/// What happened to each file during a run
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Report {
    pub phases: Vec<Phase>,
}

impl Report {
    pub fn push(&mut self, table: Table, file: impl Into<String>, outcome: Outcome) {
        self.phases.push(Phase {
            table,
            file: file.into(),
            outcome,
        });
    }

    pub fn phase(&self, table: Table) -> Option<&Phase> {
        self.phases.iter().find(|phase| phase.table == table)
    }

    pub fn has_failures(&self) -> bool {
        self.phases
            .iter()
            .any(|phase| matches!(phase.outcome, Outcome::Failed(_)))
    }

    pub fn to_table(&self) -> PrettyTable {
        let mut table = PrettyTable::new();
        table.set_titles(row!["file", "read", "inserted", "ignored", "skipped", "status"]);

        for phase in &self.phases {
            match &phase.outcome {
                Outcome::Imported(stats) => table.add_row(row![
                    phase.file,
                    stats.read,
                    stats.inserted,
                    stats.ignored,
                    stats.skipped,
                    "ok"
                ]),
                Outcome::Failed(reason) => {
                    table.add_row(row![phase.file, "-", "-", "-", "-", reason])
                }
            };
        }

        table.set_format(*FORMAT_NO_LINESEP);
        table
    }
}

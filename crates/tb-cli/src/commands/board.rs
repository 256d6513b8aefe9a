//! Board management subcommands.

use std::io::Write;

use anyhow::Result;

use tb_core::{Boards, Factory, Generator};

use super::util;

pub fn create<G: Generator>(boards: &mut Boards, factory: &Factory<G>, name: &str) -> Result<()> {
    let board = factory.create_board(name)?;
    let id = board.id.clone();
    boards.add_board(board);
    println!("Created board {name} ({id}), now current");
    Ok(())
}

pub fn switch(boards: &mut Boards, needle: &str) -> Result<()> {
    let id = util::resolve_board(boards, needle)?;
    boards.set_current(&id);
    let name = boards.board(&id).map(|b| b.name.clone()).unwrap_or_default();
    println!("Switched to board {name} ({id})");
    Ok(())
}

pub fn list<W: Write>(writer: &mut W, boards: &Boards) -> Result<()> {
    if boards.is_empty() {
        writeln!(writer, "No boards. Run `tb board create <name>`.")?;
        return Ok(());
    }
    let current = boards.current_board().map(|board| board.id.clone());
    let mut sorted: Vec<_> = boards.boards().collect();
    sorted.sort_by(|a, b| a.name.cmp(&b.name));
    for board in sorted {
        let marker = if Some(&board.id) == current.as_ref() {
            "*"
        } else {
            " "
        };
        writeln!(
            writer,
            "{marker} {} ({}) - {} activities",
            board.name,
            board.id,
            board.activities().count()
        )?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use insta::assert_snapshot;
    use tb_core::FixedGenerator;

    #[test]
    fn create_switch_and_list() {
        let factory = Factory::new(FixedGenerator::new(0));
        let mut boards = Boards::new();
        create(&mut boards, &factory, "Personal").unwrap();
        create(&mut boards, &factory, "Work").unwrap();
        assert_eq!(boards.current_board().unwrap().name, "Work");

        switch(&mut boards, "Personal").unwrap();
        assert_eq!(boards.current_board().unwrap().name, "Personal");

        let mut output = Vec::new();
        list(&mut output, &boards).unwrap();
        assert_snapshot!(String::from_utf8(output).unwrap(), @r"
        * Personal (id-1) - 0 activities
          Work (id-2) - 0 activities
        ");
    }

    #[test]
    fn switch_to_unknown_board_fails() {
        let mut boards = Boards::new();
        assert!(switch(&mut boards, "Nope").is_err());
    }
}

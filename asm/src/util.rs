use color_print::{cformat, cprintln};

use crate::label::LabelKind;
use crate::Program;

pub fn print_dump(program: &Program) {
    println!("-------+-------------+-------------+-----------------------------------------");
    for (pc, (code, word)) in program.codes.iter().zip(&program.words).enumerate() {
        let bin = word.to_bin() as u32;
        let label = program
            .labels
            .at_line(pc)
            .map(|name| cformat!("<g>{:<6}</>", name))
            .unwrap_or_else(|| " ".repeat(6));
        println!(
            "[{:04X}] {:02X} {:02X} {:02X} {:02X} | {:>11} | {:>4}: {} {}",
            pc,
            (bin >> 24) & 0xFF,
            (bin >> 16) & 0xFF,
            (bin >> 8) & 0xFF,
            bin & 0xFF,
            word.to_bin(),
            pc + 1,
            label,
            code.cformat(&program.labels)
        );
    }
    println!("-------+-------------+-------------+-----------------------------------------");

    for (name, label) in program.labels.iter() {
        let kind = match &label.kind {
            LabelKind::Code => cformat!("<g>code</>"),
            LabelKind::Fill => cformat!("<y>fill</>"),
            LabelKind::Alias(target) => cformat!("<c>fill -> {}</>", target),
        };
        cprintln!(" <b>{:<6}</> = {:>11}  {}", name, label.value, kind);
    }
}

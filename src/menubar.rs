use crate::types::{DrawOp, Style};

/// Lay out a key-hint string as glyphs, bolding any text inside `[...]`
/// brackets. Text outside brackets is dim.
pub fn menu_item_ops(item: &str, x: u16, y: u16, style: Style, z_order: i32) -> Vec<DrawOp> {
    let mut ops = Vec::with_capacity(item.len());
    let mut bracketed = false;
    for (i, ch) in item.chars().enumerate() {
        if ch == '[' {
            bracketed = true;
        }
        let style = Style {
            bold: bracketed,
            dim: !bracketed,
            ..style
        };
        ops.push(DrawOp {
            x: x + i as u16,
            y,
            ch,
            style,
            opacity: 1.0,
            z_order,
        });
        if ch == ']' {
            bracketed = false;
        }
    }
    ops
}

/// Lay out several hints on one row, two spaces apart, starting at `x`.
pub fn menu_bar_ops(items: &[String], x: u16, y: u16, style: Style, z_order: i32) -> Vec<DrawOp> {
    let mut ops = Vec::new();
    let mut col = x;
    for item in items {
        ops.extend(menu_item_ops(item, col, y, style, z_order));
        col += item.chars().count() as u16 + 2;
    }
    ops
}

/// Width in cells of `items` laid out by `menu_bar_ops`.
pub fn menu_bar_width(items: &[String]) -> u16 {
    let text: usize = items.iter().map(|i| i.chars().count()).sum();
    (text + items.len().saturating_sub(1) * 2) as u16
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn brackets_are_bold_and_rest_is_dim() {
        let ops = menu_item_ops("[q] выход", 0, 0, Style::default(), 0);
        assert!(ops[..3].iter().all(|op| op.style.bold && !op.style.dim));
        assert!(ops[3..].iter().all(|op| op.style.dim && !op.style.bold));
    }

    #[test]
    fn bar_spaces_items() {
        let items = vec!["[Enter] начать".to_string(), "[q] выход".to_string()];
        let ops = menu_bar_ops(&items, 3, 1, Style::default(), 0);
        assert_eq!(menu_bar_width(&items), 14 + 2 + 9);
        let second = ops.iter().find(|op| op.ch == 'q').unwrap();
        assert_eq!(second.x, 3 + 14 + 2 + 1);
    }
}

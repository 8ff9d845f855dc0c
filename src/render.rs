//! Text and PNG renderings of a filled (or partly filled) grid.

use std::path::Path;

use ab_glyph::{FontRef, PxScale};
use image::{Rgba, RgbaImage};
use imageproc::drawing::{draw_filled_rect_mut, draw_text_mut, text_size};
use imageproc::rect::Rect;
use log::debug;

use crate::assignment::{Assignment, Choice};
use crate::crossword::Crossword;
use crate::{Error, Result};

/// Character used for blocked cells in rendered output.
pub const BLOCK: char = '█';

/// Side of one grid cell in the image, in pixels.
pub const CELL_SIZE: u32 = 100;

/// Black margin around each open cell.
pub const CELL_BORDER: u32 = 2;

const FONT_SIZE: f32 = 80.0;
const FONT: &[u8] = include_bytes!("../assets/fonts/DejaVuSans.ttf");

const BLACK: Rgba<u8> = Rgba([0, 0, 0, 255]);
const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);

/// Lay the assigned words out on the grid. Cells outside any assigned word are `None`.
pub fn letter_grid(crossword: &Crossword, assignment: &Assignment) -> Vec<Vec<Option<char>>> {
    let mut grid = vec![vec![None; crossword.width()]; crossword.height()];

    for Choice { var_id, word_id } in assignment.choices() {
        let variable = crossword.variable(var_id);
        let word = crossword.words().get(word_id);

        for ((row, col), &glyph) in variable.cell_coords().zip(&word.glyphs) {
            grid[row][col] = Some(glyph);
        }
    }

    grid
}

/// Turn the given crossword and assignment into a rendered string, one line per row. Open cells
/// without a letter render as spaces.
pub fn render_grid(crossword: &Crossword, assignment: &Assignment) -> String {
    let letters = letter_grid(crossword, assignment);

    let lines: Vec<String> = letters
        .iter()
        .enumerate()
        .map(|(row, cells)| {
            cells
                .iter()
                .enumerate()
                .map(|(col, letter)| {
                    if crossword.is_open(row, col) {
                        letter.unwrap_or(' ')
                    } else {
                        BLOCK
                    }
                })
                .collect()
        })
        .collect();

    lines.join("\n")
}

/// Draw the grid on a black canvas: every open cell is a white square inset by `CELL_BORDER`, with
/// its letter (if any) centred in it.
pub fn draw_image(crossword: &Crossword, assignment: &Assignment) -> Result<RgbaImage> {
    let font = FontRef::try_from_slice(FONT)?;
    let scale = PxScale::from(FONT_SIZE);
    let interior = CELL_SIZE - 2 * CELL_BORDER;
    let letters = letter_grid(crossword, assignment);

    let mut image = RgbaImage::from_pixel(
        crossword.width() as u32 * CELL_SIZE,
        crossword.height() as u32 * CELL_SIZE,
        BLACK,
    );

    for (row, cells) in letters.iter().enumerate() {
        for (col, letter) in cells.iter().enumerate() {
            if !crossword.is_open(row, col) {
                continue;
            }

            let x = col as u32 * CELL_SIZE + CELL_BORDER;
            let y = row as u32 * CELL_SIZE + CELL_BORDER;
            draw_filled_rect_mut(
                &mut image,
                Rect::at(x as i32, y as i32).of_size(interior, interior),
                WHITE,
            );

            if let Some(letter) = letter {
                let text = letter.to_string();
                let (w, h) = text_size(scale, &font, &text);
                let dx = (interior as i32 - w as i32) / 2;
                let dy = (interior as i32 - h as i32) / 2;
                let (x, y) = (x as i32 + dx, y as i32 + dy);
                draw_text_mut(&mut image, BLACK, x, y, scale, &font, &text);
            }
        }
    }

    Ok(image)
}

/// Draw the grid with `draw_image` and save it to `path`. The format follows the file extension.
pub fn render_image(
    crossword: &Crossword,
    assignment: &Assignment,
    path: impl AsRef<Path>,
) -> Result<()> {
    let path = path.as_ref();
    let image = draw_image(crossword, assignment)?;

    image.save(path).map_err(|err| Error::image(path, err))?;
    debug!(
        target: "crossword",
        "saved {}x{} image to {}",
        image.width(),
        image.height(),
        path.display(),
    );

    Ok(())
}

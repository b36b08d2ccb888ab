//! Filename synthesis for renamed episodes and movies.

/// Digits needed to print every episode number of a season of `count` files
/// at a fixed width.
///
/// This is `ceil(log10(count))`, floored at 1 and computed in integers so a
/// single-file season never hits `log10(1) = 0`.
///
/// ```
/// use mediashelf::pipeline::naming::pad_width;
///
/// assert_eq!(pad_width(1), 1);
/// assert_eq!(pad_width(45), 2);
/// assert_eq!(pad_width(100), 2);
/// assert_eq!(pad_width(101), 3);
/// ```
pub fn pad_width(count: usize) -> usize {
    let mut width = 1;
    let mut capacity: u128 = 10;
    while capacity < count as u128 {
        width += 1;
        capacity *= 10;
    }
    width
}

/// `(<show>) [S<season>E<episode>] <name><ext>`
///
/// `ext` includes its leading dot, or is empty.
pub fn episode_filename(
    show: &str,
    season: u32,
    episode: u32,
    width: usize,
    name: &str,
    ext: &str,
) -> String {
    format!(
        "({}) [S{}E{:0width$}] {}{}",
        sanitize(show),
        season,
        episode,
        sanitize(name),
        ext,
        width = width
    )
}

/// `<title><ext>`
pub fn movie_filename(title: &str, ext: &str) -> String {
    format!("{}{}", sanitize(title), ext)
}

/// Replace path separators so a catalog title can't leave its directory.
pub fn sanitize(text: &str) -> String {
    text.replace(['/', '\\'], "-")
}

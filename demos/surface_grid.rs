use grapheval_rs::ast::{dual_points, Parser};

/// Evaluates a surface on a square grid the way a 3D plot would, skipping
/// vertices that come out non-finite.
fn main() {
    pretty_env_logger::init();

    let variables = ['x', 'y'];
    let expression = "sqrt(1 - x^2 - y^2)";
    let ast = Parser::new(&variables).parse(expression);

    let resolution = 8;
    let points: Vec<[f64; 2]> = (0..=resolution)
        .flat_map(|i| {
            (0..=resolution).map(move |j| {
                let x = -1.0 + 2.0 * i as f64 / resolution as f64;
                let y = -1.0 + 2.0 * j as f64 / resolution as f64;
                [x, y]
            })
        })
        .collect();

    let slopes = dual_points(&ast, &points, 0);
    let drawn = slopes.iter().filter(|dual| dual.is_finite()).count();
    println!(
        "{}: {} of {} vertices drawable",
        expression,
        drawn,
        points.len()
    );
}

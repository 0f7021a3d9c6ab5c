use grapheval_rs::ast::{sample_interval, Parser};

fn main() {
    pretty_env_logger::init();

    let ast = Parser::new(&['x']).parse("x^3 - 2x");

    for (x, dual) in sample_interval(&ast, -2.0, 2.0, 8) {
        println!("x = {:>5.2}  f = {:>8.4}  f' = {:>8.4}", x, dual.value, dual.derivative);
    }
}

use grapheval_rs::ast::Parser;
use grapheval_rs::{parse_number, try_parse_expression};
use log::debug;

fn main() {
    pretty_env_logger::init();

    let variables = ['x', 'y', 'u'];
    let parser = Parser::new(&variables);

    let expr = "sin(x^2)+u*cos(y)";
    let ast = parser.parse(expr);
    debug!("ast: {ast:?}");
    println!("{} => {}", expr, ast.display_with(&variables));

    let point = [1.0, 0.5, 2.0];
    for (slot, name) in variables.iter().enumerate() {
        let dual = ast.dual(&point, slot);
        println!(
            "at {:?}: value = {}, d/d{} = {}",
            point, dual.value, name, dual.derivative
        );
    }

    for bad in ["1+*2", "mod(1)", "sin(x"] {
        match try_parse_expression(bad, &variables) {
            Ok(ast) => println!("{bad} => {ast}"),
            Err(err) => println!("{bad} rejected: {err}"),
        }
    }

    for field in ["2*pi", "1/0", "ten"] {
        match parse_number(field) {
            Ok(value) => println!("bound {field} = {value}"),
            Err(err) => println!("bound {field}: {err}"),
        }
    }
}

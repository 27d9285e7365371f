use livr::Validator;
use serde_json::json;

fn main() {
    let mut validator = Validator::new(json!({
        "name": ["required", {"length_between": [2, 20]}],
        "email": ["required", {"like": ["^.+@.+$", "i"]}],
        "gender": [{"one_of": [["male", "female", "other"]]}],
        "phone": [{"max_length": 10}],
    }));

    let good = json!({
        "name": "Harry",
        "email": "harry@example.org",
        "gender": "male",
    });
    match validator.validate(&good).expect("schema compiles") {
        Some(output) => println!("valid: {}", serde_json::Value::Object(output)),
        None => println!("invalid: {:?}", validator.errors()),
    }

    let bad = json!({
        "name": "H",
        "email": "not-an-address",
        "phone": "123456789012345",
    });
    match validator.validate(&bad).expect("schema compiles") {
        Some(output) => println!("valid: {}", serde_json::Value::Object(output)),
        None => {
            let errors = validator.errors().expect("errors are stored on failure");
            println!(
                "invalid: {}",
                serde_json::to_string(errors).expect("errors serialize")
            );
        }
    }
}

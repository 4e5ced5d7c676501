//

extern crate delegates;
use delegates::core::interp::Interp;
use delegates::objects::derived::DerivedObject;
use delegates::{delegate, Value};

fn main() {
    let mut interp = Interp::new().unwrap();
    let global = Value::Object(interp.global());

    // request.prototype: method, headers, accepts(type)
    let request = DerivedObject::new()
        .value("method", "GET")
        .value("path", "/")
        .method("accepts", |interp, args| {
            let this = interp.context();
            let accept = interp.get(&this, "accept")?;
            Ok(Value::Bool(args.first() == Some(&accept)))
        })
        .insert(&mut interp)
        .unwrap();
    // response.prototype: status, body
    let response = DerivedObject::new()
        .value("status", 404)
        .value("body", Value::Null)
        .insert(&mut interp)
        .unwrap();

    let context = interp.create_object(None).unwrap();
    interp.set(&global, "context", Value::Object(context)).unwrap();

    delegate(&mut interp, context, "request")
        .method("accepts")
        .unwrap()
        .access("path")
        .unwrap()
        .getter("method")
        .unwrap();
    delegate::auto(&mut interp, context, response, "response").unwrap();

    // ctx = { request: new Request, response: new Response }
    let ctx = Value::Object(interp.create_object(Some(context)).unwrap());
    interp.set(&global, "ctx", ctx.clone()).unwrap();
    let req = Value::Object(interp.create_object(Some(request)).unwrap());
    interp.set(&req, "accept", Value::from("json")).unwrap();
    interp.set(&ctx, "request", req).unwrap();
    let res = Value::Object(interp.create_object(Some(response)).unwrap());
    interp.set(&ctx, "response", res.clone()).unwrap();

    // ctx.path = "/users"; ctx.status = 200; ctx.body = "[]"
    interp.set(&ctx, "path", Value::from("/users")).unwrap();
    interp.set(&ctx, "status", Value::Int(200)).unwrap();
    interp.set(&ctx, "body", Value::from("[]")).unwrap();

    println!(
        "{} {} -> {} {}",
        interp.get(&ctx, "method").unwrap(),
        interp.get(&ctx, "path").unwrap(),
        interp.get(&res, "status").unwrap(),
        interp.get(&res, "body").unwrap(),
    );
    println!(
        "accepts json? {}",
        interp
            .call_method(&ctx, "accepts", &[Value::from("json")])
            .unwrap()
    );

    // a context without a response
    let orphan = Value::Object(interp.create_object(Some(context)).unwrap());
    match interp.get(&orphan, "status") {
        Err(err) => println!("orphan context: {}", err),
        Ok(status) => println!("orphan context status {}", status),
    }
}

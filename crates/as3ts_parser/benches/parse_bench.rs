use as3ts_parser::Parser;
use bumpalo::Bump;
use criterion::{black_box, criterion_group, criterion_main, Criterion};

// A medium-size ActionScript source with various constructs
const ACTIONSCRIPT_SOURCE: &str = r#"
/**
 * Inventory model used by the shop screen.
 */
package com.example.shop
{
    import flash.display.Sprite;
    import flash.events.Event;
    import flash.utils.*;

    public interface IStock
    {
        function get count():int;
        function restock(amount:int, ...reasons):void;
    }

    public class Inventory extends Sprite implements IStock
    {
        public static const MAX_ITEMS:int = 64;
        private var _items:Vector.<String> = new Vector.<String>();
        private var _count:int = 0, _dirty:Boolean = false;

        /* Creates an empty inventory. */
        public function Inventory(name:String = "default")
        {
            super();
            addEventListener(Event.ADDED_TO_STAGE, onAdded);
        }

        public function get count():int
        {
            return _count;
        }

        public function set label(value:String):void
        {
            _items[0] = value;
        }

        public function restock(amount:int, ...reasons):void
        {
            for (var i:int = 0; i < amount; i++)
            {
                if (_count >= MAX_ITEMS)
                {
                    /* full */
                    break;
                }
                _items.push("item" + i);
                _count += 1;
            }
            _dirty = _count > 0 && reasons.length != 0;
        }

        private function onAdded(event:Event):void
        {
            var handler:Function = function(e:Event):void {
                trace(e.type, { count: _count, dirty: _dirty });
            };
            while (_count > MAX_ITEMS >> 1)
            {
                _count--;
            }
            handler(event);
        }

        override public function toString():String
        {
            return _dirty ? "[Inventory*]" : "[Inventory " + _count + "]";
        }
    }
}
"#;

fn bench_parse_actionscript(c: &mut Criterion) {
    c.bench_function("parse_actionscript_medium", |b| {
        b.iter(|| {
            let arena = Bump::new();
            let mut parser = Parser::new(&arena, "bench.as", black_box(ACTIONSCRIPT_SOURCE));
            let unit = parser.parse_compilation_unit();
            black_box(unit.is_ok());
        });
    });
}

criterion_group!(benches, bench_parse_actionscript);
criterion_main!(benches);

use {
    crate::{
        backend::KeyState,
        config::KeymapNames,
        keyboard::{
            Keymap, KeymapFd, KeymapState, LED_CAPS_LOCK, LED_NUM_LOCK, LED_SCROLL_LOCK,
            ModMasks, ModifierState,
        },
        utils::oserror::OsError,
    },
    kbvm::{
        Components, Keycode, ModifierMask,
        state_machine::{self, Direction, Event, StateMachine},
        xkb::{
            self,
            diagnostic::{Diagnostic, WriteToLog},
            keymap::{Indicator, IndicatorMatcher},
            rmlvo,
        },
    },
    std::{io::Write, rc::Rc},
    thiserror::Error,
    uapi::c,
};

#[derive(Debug, Error)]
pub enum KbvmError {
    #[error("could not parse the keymap")]
    CouldNotParseKeymap(#[source] Diagnostic),
    #[error("Could not create a keymap memfd")]
    KeymapMemfd(#[source] OsError),
}

pub struct KbvmContext {
    pub ctx: xkb::Context,
}

impl Default for KbvmContext {
    fn default() -> Self {
        let mut ctx = xkb::Context::builder();
        ctx.enable_environment(true);
        Self { ctx: ctx.build() }
    }
}

impl KbvmContext {
    /// A context that only resolves the keymap it is given.
    pub fn isolated() -> Self {
        let mut ctx = xkb::Context::builder();
        ctx.enable_environment(false);
        ctx.enable_default_includes(false);
        Self { ctx: ctx.build() }
    }

    pub fn parse_keymap(&self, keymap: &[u8]) -> Result<Rc<KbvmMap>, KbvmError> {
        let map = self
            .ctx
            .keymap_from_bytes(WriteToLog, None, keymap)
            .map_err(KbvmError::CouldNotParseKeymap)?;
        KbvmMap::new(&map)
    }

    /// Compiles the keymap described by rule names.
    pub fn compile(&self, names: &KeymapNames) -> Result<Rc<KbvmMap>, KbvmError> {
        log::info!(
            "Compiling keymap: rules {}, model {}, layout {}, variant {}, options {}",
            names.rules,
            names.model,
            names.layout,
            names.variant,
            names.options,
        );
        let groups: Vec<_> =
            rmlvo::Group::from_layouts_and_variants(&names.layout, &names.variant).collect();
        let options: Vec<_> = names
            .options
            .split(',')
            .map(|o| o.trim())
            .filter(|o| !o.is_empty())
            .collect();
        let map = self.ctx.keymap_from_names(
            WriteToLog,
            non_empty(&names.rules),
            non_empty(&names.model),
            non_empty(&names.layout).map(|_| &*groups),
            Some(&*options),
        );
        let res = KbvmMap::new(&map);
        if res.is_err() {
            log::error!("failed to compile the global keymap");
        }
        res
    }
}

fn non_empty(s: &str) -> Option<&str> {
    Some(s).filter(|s| !s.is_empty())
}

fn create_keymap_memfd(map: &xkb::Keymap) -> Result<KeymapFd, OsError> {
    let str = format!("{}\n", map.format());
    let mut memfd = uapi::memfd_create("keymap", c::MFD_CLOEXEC | c::MFD_ALLOW_SEALING)?;
    memfd.write_all(str.as_bytes())?;
    memfd.write_all(&[0])?;
    uapi::lseek(memfd.raw(), 0, c::SEEK_SET)?;
    uapi::fcntl_add_seals(
        memfd.raw(),
        c::F_SEAL_SEAL | c::F_SEAL_GROW | c::F_SEAL_SHRINK | c::F_SEAL_WRITE,
    )?;
    Ok(KeymapFd {
        map: Rc::new(memfd),
        len: str.len() + 1,
    })
}

pub struct KbvmMap {
    state_machine: StateMachine,
    map: KeymapFd,
    num_lock: Option<IndicatorMatcher>,
    caps_lock: Option<IndicatorMatcher>,
    scroll_lock: Option<IndicatorMatcher>,
}

impl KbvmMap {
    fn new(map: &xkb::Keymap) -> Result<Rc<Self>, KbvmError> {
        let mut num_lock = None;
        let mut caps_lock = None;
        let mut scroll_lock = None;
        for indicator in map.indicators() {
            match indicator.name() {
                Indicator::NUM_LOCK => num_lock = Some(indicator.matcher()),
                Indicator::CAPS_LOCK => caps_lock = Some(indicator.matcher()),
                Indicator::SCROLL_LOCK => scroll_lock = Some(indicator.matcher()),
                _ => {}
            }
        }
        let fd = create_keymap_memfd(map).map_err(KbvmError::KeymapMemfd)?;
        Ok(Rc::new(Self {
            state_machine: map.to_builder().build_state_machine(),
            map: fd,
            num_lock,
            caps_lock,
            scroll_lock,
        }))
    }
}

pub struct KbvmState {
    map: Rc<KbvmMap>,
    state: state_machine::State,
    components: Components,
    events: Vec<Event>,
}

impl Keymap for KbvmMap {
    fn fd(&self) -> KeymapFd {
        self.map.clone()
    }

    fn mod_masks(&self) -> ModMasks {
        ModMasks {
            ctrl: ModifierMask::CONTROL.0,
            alt: ModifierMask::ALT.0,
            super_: ModifierMask::MOD4.0,
            shift: ModifierMask::SHIFT.0,
        }
    }

    fn create_state(self: Rc<Self>) -> Box<dyn KeymapState> {
        Box::new(KbvmState {
            state: self.state_machine.create_state(),
            map: self,
            components: Components::default(),
            events: vec![],
        })
    }
}

impl KeymapState for KbvmState {
    fn update_key(&mut self, key: u32, state: KeyState) {
        let direction = match state {
            KeyState::Released => Direction::Up,
            KeyState::Pressed => Direction::Down,
        };
        self.map.state_machine.handle_key(
            &mut self.state,
            &mut self.events,
            Keycode::from_evdev(key),
            direction,
        );
        for event in self.events.drain(..) {
            self.components.apply_event(event);
        }
    }

    fn update_mask(&mut self, mods: ModifierState) {
        self.components.mods_pressed.0 = mods.mods_depressed;
        self.components.mods_latched.0 = mods.mods_latched;
        self.components.mods_locked.0 = mods.mods_locked;
        self.components.group_locked.0 = mods.group;
        self.components.update_effective();
    }

    fn serialize(&self) -> ModifierState {
        ModifierState {
            mods_depressed: self.components.mods_pressed.0,
            mods_latched: self.components.mods_latched.0,
            mods_locked: self.components.mods_locked.0,
            group: self.components.group.0,
        }
    }

    fn leds(&self) -> u32 {
        let mut leds = 0;
        let active = |m: &Option<IndicatorMatcher>| match m {
            Some(m) => m.matches(&self.components),
            None => false,
        };
        if active(&self.map.num_lock) {
            leds |= LED_NUM_LOCK;
        }
        if active(&self.map.caps_lock) {
            leds |= LED_CAPS_LOCK;
        }
        if active(&self.map.scroll_lock) {
            leds |= LED_SCROLL_LOCK;
        }
        leds
    }
}

#[cfg(test)]
mod tests {
    use {
        crate::{
            backend::KeyState,
            config::KeymapNames,
            kbvm::KbvmContext,
            keyboard::{Keymap, MODIFIER_CTRL, ModifierAdapter, ModifierState},
        },
        kbvm::xkb,
        std::{fs, path::PathBuf, rc::Rc},
    };

    const CONTROL_ONLY: &str = r#"
        xkb_keymap {
            xkb_keycodes {
                  <2> =  10;
                 <29> =  37;
            };

            xkb_types {
                type "TWO_LEVEL" {
                    modifiers  = Shift;
                    map[Shift] = Level2;
                };
            };

            xkb_compatibility {
                interpret.repeat  = False;
                interpret.locking = False;
                interpret Control_L {
                    action = SetMods(modifiers=Control);
                };
            };

            xkb_symbols {
                key  <2> { [ 1, exclam ] };
                key <29> { [ Control_L ] };
            };
        };
    "#;

    #[test]
    fn control_press_sets_depressed_mask() {
        let map = KbvmContext::isolated()
            .parse_keymap(CONTROL_ONLY.as_bytes())
            .unwrap();
        assert!(map.fd().len > 1);
        let keymap: Rc<dyn Keymap> = map;
        let adapter = ModifierAdapter::new(&keymap);
        let prev = ModifierState::default();
        let update = adapter.update(&prev, 29, KeyState::Pressed);
        assert!(update.changed);
        assert_eq!(update.mods.mods_depressed, 4);
        assert_eq!(update.modifier_state, MODIFIER_CTRL);
        let update = adapter.update(&update.mods, 29, KeyState::Released);
        assert!(update.changed);
        assert_eq!(update.mods, ModifierState::default());
        assert_eq!(update.modifier_state, 0);
    }

    #[test]
    fn plain_key_leaves_modifiers_alone() {
        let map = KbvmContext::isolated()
            .parse_keymap(CONTROL_ONLY.as_bytes())
            .unwrap();
        let keymap: Rc<dyn Keymap> = map;
        let adapter = ModifierAdapter::new(&keymap);
        let update = adapter.update(&ModifierState::default(), 2, KeyState::Pressed);
        assert!(!update.changed);
        assert_eq!(update.leds, 0);
    }

    const RULES: &str = "\
! model = keycodes
  *     = evdev

! model = types
  *     = complete

! model = compat
  *     = complete

! layout = symbols
  *      = %l

! option      = symbols
  ctrl:nocaps = +ctrl(nocaps)
";

    fn rules_dir(name: &str) -> PathBuf {
        let root = std::env::temp_dir().join(format!("seat-focus-xkb-{}-{}", name, std::process::id()));
        let files = [
            ("rules/evdev", RULES),
            (
                "keycodes/evdev",
                "default xkb_keycodes \"evdev\" {\n    <CAPS> = 66;\n    <LCTL> = 37;\n};\n",
            ),
            ("types/complete", "default xkb_types \"complete\" { };\n"),
            ("compat/complete", "default xkb_compatibility \"complete\" { };\n"),
            (
                "symbols/us",
                "default xkb_symbols \"basic\" {\n    key <CAPS> { [ Caps_Lock ] };\n    key <LCTL> { [ Control_L ] };\n};\n",
            ),
            (
                "symbols/ctrl",
                "xkb_symbols \"nocaps\" {\n    replace key <CAPS> { [ Control_L ] };\n};\n",
            ),
        ];
        for (path, contents) in files {
            let path = root.join(path);
            fs::create_dir_all(path.parent().unwrap()).unwrap();
            fs::write(path, contents).unwrap();
        }
        root
    }

    fn keymap_text(ctx: &KbvmContext, names: &KeymapNames) -> String {
        let map = ctx.compile(names).unwrap();
        let fd = map.fd();
        fs::read_to_string(format!("/proc/self/fd/{}", fd.map.raw())).unwrap()
    }

    #[test]
    fn options_reach_the_compiled_keymap() {
        let root = rules_dir("options");
        let mut builder = xkb::Context::builder();
        builder.enable_environment(false);
        builder.enable_default_includes(false);
        builder.append_path(&root);
        let ctx = KbvmContext {
            ctx: builder.build(),
        };
        let plain = keymap_text(&ctx, &KeymapNames::default());
        let nocaps = keymap_text(
            &ctx,
            &KeymapNames {
                options: "ctrl:nocaps".to_string(),
                ..Default::default()
            },
        );
        let _ = fs::remove_dir_all(&root);
        assert!(plain.contains("Caps_Lock"));
        assert_ne!(plain, nocaps);
    }
}

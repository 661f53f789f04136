/// Logical inputs named by the community mapping database.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SemanticInput {
    A,
    B,
    X,
    Y,
    Back,
    Start,
    Guide,
    LeftShoulder,
    RightShoulder,
    LeftStick,
    RightStick,
    DpUp,
    DpDown,
    DpLeft,
    DpRight,
    LeftX,
    LeftY,
    RightX,
    RightY,
    LeftTrigger,
    RightTrigger,
    /// Trigger reported as a plain button rather than an axis.
    LeftTriggerButton,
    RightTriggerButton,
}

impl SemanticInput {
    pub const ALL: [Self; 23] = [
        Self::A,
        Self::B,
        Self::X,
        Self::Y,
        Self::Back,
        Self::Start,
        Self::Guide,
        Self::LeftShoulder,
        Self::RightShoulder,
        Self::LeftStick,
        Self::RightStick,
        Self::DpUp,
        Self::DpDown,
        Self::DpLeft,
        Self::DpRight,
        Self::LeftX,
        Self::LeftY,
        Self::RightX,
        Self::RightY,
        Self::LeftTrigger,
        Self::RightTrigger,
        Self::LeftTriggerButton,
        Self::RightTriggerButton,
    ];

    /// Parse a database key into a semantic input.
    /// Unknown keys return `None` and are skipped by the parser.
    pub fn parse(name: &str) -> Option<Self> {
        Some(match name {
            "a" => Self::A,
            "b" => Self::B,
            "x" => Self::X,
            "y" => Self::Y,

            "back" => Self::Back,
            "start" => Self::Start,
            "guide" => Self::Guide,

            "leftshoulder" => Self::LeftShoulder,
            "rightshoulder" => Self::RightShoulder,
            "leftstick" => Self::LeftStick,
            "rightstick" => Self::RightStick,

            "dpup" => Self::DpUp,
            "dpdown" => Self::DpDown,
            "dpleft" => Self::DpLeft,
            "dpright" => Self::DpRight,

            "leftx" => Self::LeftX,
            "lefty" => Self::LeftY,
            "rightx" => Self::RightX,
            "righty" => Self::RightY,

            "lefttrigger" => Self::LeftTrigger,
            "righttrigger" => Self::RightTrigger,
            "lefttriggerbutton" => Self::LeftTriggerButton,
            "righttriggerbutton" => Self::RightTriggerButton,

            _ => return None,
        })
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::A => "a",
            Self::B => "b",
            Self::X => "x",
            Self::Y => "y",
            Self::Back => "back",
            Self::Start => "start",
            Self::Guide => "guide",
            Self::LeftShoulder => "leftshoulder",
            Self::RightShoulder => "rightshoulder",
            Self::LeftStick => "leftstick",
            Self::RightStick => "rightstick",
            Self::DpUp => "dpup",
            Self::DpDown => "dpdown",
            Self::DpLeft => "dpleft",
            Self::DpRight => "dpright",
            Self::LeftX => "leftx",
            Self::LeftY => "lefty",
            Self::RightX => "rightx",
            Self::RightY => "righty",
            Self::LeftTrigger => "lefttrigger",
            Self::RightTrigger => "righttrigger",
            Self::LeftTriggerButton => "lefttriggerbutton",
            Self::RightTriggerButton => "righttriggerbutton",
        }
    }

    /// Whether this input is one of the digital d-pad directions.
    pub fn is_dpad(self) -> bool {
        matches!(self, Self::DpUp | Self::DpDown | Self::DpLeft | Self::DpRight)
    }

    /// Whether this input is a trigger, in either representation.
    pub fn is_trigger(self) -> bool {
        matches!(
            self,
            Self::LeftTrigger
                | Self::RightTrigger
                | Self::LeftTriggerButton
                | Self::RightTriggerButton
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roundtrip_all_names() {
        for input in SemanticInput::ALL {
            assert_eq!(SemanticInput::parse(input.as_str()), Some(input));
        }
    }

    #[test]
    fn unknown_name_is_none() {
        assert_eq!(SemanticInput::parse("misc1"), None);
        assert_eq!(SemanticInput::parse("paddle1"), None);
        assert_eq!(SemanticInput::parse(""), None);
    }
}
